//! Python outline builder: classes, functions, decorators, docstrings.
//!
//! Walks logical lines once, keeping a stack of open blocks keyed by the
//! indentation of their header. A line closes every block whose header is
//! indented at least as deep; closed elements end after the last logical
//! line seen inside them, so trailing blank lines and comments stay outside.
//!
//! Compound statements (`if`, `for`, `try`, `with`, ...) open transparent
//! blocks: definitions inside them belong to the nearest enclosing element.

mod doc;
mod helpers;

use std::cmp::Ordering;
use std::mem;

use doc::{clean_docstring, lone_string_literal};
use helpers::{
    ImportClause, Statement, contains_keyword, decorator_matches_any, is_context_manager,
    is_property, lambda_parameters, parse_statement,
};

use crate::error::ExtractionError;
use crate::language::Language;
use crate::lexer::{Indent, LogicalLine, logical_lines, physical_line_count};
use crate::outline::Outline;
use crate::types::{Element, ElementId, ElementKind, Import, Span};
use crate::{ExtractOptions, Extraction};

/// Name given to the `if __name__ == "__main__":` block.
pub const MAIN_GUARD_NAME: &str = "__main__";

/// Build the outline of a Python source text.
pub(crate) fn extract(source: &str, options: &ExtractOptions) -> Extraction {
    let lexed = logical_lines(source, options.tab_width);
    let mut builder = Builder::new(source);
    let mut errors = Vec::new();

    for line in &lexed.lines {
        if let Err(error) = builder.process(line) {
            errors.push(error);
            break;
        }
    }
    if errors.is_empty() {
        errors.extend(lexed.error);
    }

    Extraction {
        outline: builder.finish(),
        errors,
    }
}

/// An open indented block.
#[derive(Debug)]
struct Scope {
    /// `None` for the module itself.
    header: Option<Indent>,
    /// Indentation of the first statement inside the block.
    body: Option<Indent>,
    /// `None` for transparent blocks.
    element: Option<ElementId>,
    expects_doc: bool,
}

/// Where a decorator line sits, for span extension.
#[derive(Debug)]
struct PendingDecorator {
    text: String,
    line: u32,
    start: usize,
    column: u32,
    indent: Indent,
}

struct Builder {
    outline: Outline,
    scopes: Vec<Scope>,
    decorators: Vec<PendingDecorator>,
    /// Index into `decorators` of the run directly above the current line.
    adjacent_from: Option<usize>,
    /// Last physical line and end byte of the most recent logical line.
    last_end: (u32, usize),
}

impl Builder {
    fn new(source: &str) -> Self {
        let root_span = Span {
            start_line: 1,
            end_line: physical_line_count(source) + 1,
            start_column: 0,
            start_byte: 0,
            end_byte: source.len(),
        };
        Self {
            outline: Outline::new(Language::Python, root_span),
            scopes: vec![Scope {
                header: None,
                body: None,
                element: Some(ElementId::ROOT),
                expects_doc: true,
            }],
            decorators: Vec::new(),
            adjacent_from: None,
            last_end: (1, 0),
        }
    }

    fn process(&mut self, line: &LogicalLine) -> Result<(), ExtractionError> {
        self.close_scopes(line)?;

        let Some(scope) = self.scopes.last_mut() else {
            return Ok(());
        };
        match scope.body {
            Some(body) if line.indent.compare(body).is_none() => {
                return Err(ExtractionError::AmbiguousIndent {
                    line: line.first_line,
                });
            }
            Some(_) => {}
            None => scope.body = Some(line.indent),
        }
        let expects_doc = mem::take(&mut scope.expects_doc);
        let scope_element = scope.element;

        if expects_doc {
            if let Some(raw) = lone_string_literal(&line.code) {
                if let Some(id) = scope_element {
                    self.outline.element_mut(id).doc = clean_docstring(raw);
                }
                self.adjacent_from = None;
                self.finish_line(line);
                return Ok(());
            }
        }

        let statement = parse_statement(&line.code);
        let was_decorator = matches!(statement, Statement::Decorator(_));
        match statement {
            Statement::Decorator(text) => self.push_decorator(line, text),
            Statement::Def {
                name,
                signature,
                is_async,
                inline_body,
            } => {
                let parent = self.enclosing_element();
                let mut element = self.new_element(line, ElementKind::Function, name);
                element.kind = classify_def(
                    self.kind_of(parent),
                    &element.decorators,
                    is_async,
                );
                element.signature = signature.to_string();
                element.is_async = is_async;
                if inline_body && contains_keyword(&line.code, "yield") {
                    element.is_generator = true;
                }
                self.open(line, parent, element, inline_body);
            }
            Statement::Class {
                name,
                signature,
                bases,
                inline_body,
            } => {
                let parent = self.enclosing_element();
                let mut element = self.new_element(line, ElementKind::Class, name);
                element.signature = signature.to_string();
                element.bases = bases;
                self.open(line, parent, element, inline_body);
            }
            Statement::MainGuard { inline_body } if self.at_module_level() => {
                let element = self.new_element(line, ElementKind::Module, MAIN_GUARD_NAME);
                self.open(line, ElementId::ROOT, element, inline_body);
            }
            Statement::MainGuard { inline_body } | Statement::Compound { inline_body } => {
                self.mark_generator(&line.code);
                if !inline_body {
                    self.scopes.push(Scope {
                        header: Some(line.indent),
                        body: None,
                        element: None,
                        expects_doc: false,
                    });
                }
            }
            Statement::Assignment {
                name,
                annotation,
                value,
            } => {
                self.mark_generator(&line.code);
                self.assignment(line, scope_element, name, annotation, value);
            }
            Statement::Import(clauses) => {
                if self.enclosing_element() == ElementId::ROOT {
                    self.record_imports(line, clauses);
                }
            }
            Statement::Other => self.mark_generator(&line.code),
        }

        if !was_decorator {
            self.adjacent_from = None;
        }
        self.finish_line(line);
        Ok(())
    }

    /// Pop every block the line is not nested in.
    fn close_scopes(&mut self, line: &LogicalLine) -> Result<(), ExtractionError> {
        while let Some(scope) = self.scopes.last() {
            let Some(header) = scope.header else {
                break;
            };
            match line.indent.compare(header) {
                None => {
                    return Err(ExtractionError::AmbiguousIndent {
                        line: line.first_line,
                    });
                }
                Some(Ordering::Greater) => break,
                Some(_) => self.pop_scope(),
            }
        }
        Ok(())
    }

    fn pop_scope(&mut self) {
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        if let Some(id) = scope.element {
            let (last_line, end_byte) = self.last_end;
            let span = &mut self.outline.element_mut(id).span;
            span.end_line = last_line + 1;
            span.end_byte = end_byte;
        }
    }

    fn push_decorator(&mut self, line: &LogicalLine, text: &str) {
        let continues_run = self.adjacent_from.is_some()
            && self
                .decorators
                .last()
                .is_some_and(|last| last.indent == line.indent);
        if !continues_run {
            self.adjacent_from = Some(self.decorators.len());
        }
        self.decorators.push(PendingDecorator {
            text: text.to_string(),
            line: line.first_line,
            start: line.start,
            column: column(line),
            indent: line.indent,
        });
    }

    /// Create an element for the header on `line`, consuming pending decorators.
    ///
    /// Only a run of decorators directly above the header at the same
    /// indentation moves the span start; earlier dangling ones are attached
    /// without widening the span.
    fn new_element(&mut self, line: &LogicalLine, kind: ElementKind, name: &str) -> Element {
        let adjacent = self.adjacent_from.filter(|&from| {
            self.decorators
                .get(from)
                .is_some_and(|first| first.indent == line.indent)
        });
        let (start_line, start_byte, start_column) = match adjacent {
            Some(from) => {
                let first = &self.decorators[from];
                (first.line, first.start, first.column)
            }
            None => (line.first_line, line.start, column(line)),
        };
        let decorators = mem::take(&mut self.decorators);
        self.adjacent_from = None;

        let span = Span {
            start_line,
            end_line: line.last_line + 1,
            start_column,
            start_byte,
            end_byte: line.end,
        };
        let mut element = Element::new(kind, name, span);
        element.header_line = line.first_line;
        element.decorators = decorators.into_iter().map(|d| d.text).collect();
        element
    }

    /// Attach `element` and open its block unless the body is inline.
    fn open(&mut self, line: &LogicalLine, parent: ElementId, element: Element, inline_body: bool) {
        tracing::trace!(
            kind = %element.kind,
            name = %element.name,
            line = element.header_line,
            "element"
        );
        let id = self.outline.push(parent, element);
        if !inline_body {
            self.scopes.push(Scope {
                header: Some(line.indent),
                body: None,
                element: Some(id),
                expects_doc: true,
            });
        }
    }

    fn assignment(
        &mut self,
        line: &LogicalLine,
        scope_element: Option<ElementId>,
        name: &str,
        annotation: Option<&str>,
        value: Option<&str>,
    ) {
        if let Some(parameters) = value.and_then(lambda_parameters) {
            let parent = self.enclosing_element();
            let mut element = self.new_element(line, ElementKind::LambdaBinding, name);
            element.signature = format!("({parameters})");
            self.outline.push(parent, element);
            return;
        }

        let holds_fields = scope_element.is_some_and(|id| {
            id == ElementId::ROOT || self.kind_of(id) == ElementKind::Class
        });
        if holds_fields {
            let mut element = self.new_element(line, ElementKind::Field, name);
            element.signature = annotation.unwrap_or_default().to_string();
            if let Some(parent) = scope_element {
                self.outline.push(parent, element);
            }
        }
    }

    fn record_imports(&mut self, line: &LogicalLine, clauses: Vec<ImportClause>) {
        for clause in clauses {
            self.outline.push_import(Import {
                module: clause.module,
                names: clause.names,
                line: line.first_line,
            });
        }
    }

    /// Flag the innermost function-like element as a generator on `yield`.
    fn mark_generator(&mut self, code: &str) {
        if !contains_keyword(code, "yield") {
            return;
        }
        let function = self
            .scopes
            .iter()
            .rev()
            .filter_map(|scope| scope.element)
            .find(|&id| self.kind_of(id).is_function_like());
        if let Some(id) = function {
            self.outline.element_mut(id).is_generator = true;
        }
    }

    fn finish_line(&mut self, line: &LogicalLine) {
        self.last_end = (line.last_line, line.end);
    }

    /// Innermost element whose block is open.
    fn enclosing_element(&self) -> ElementId {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.element)
            .unwrap_or(ElementId::ROOT)
    }

    /// Whether the current line sits directly in the module body.
    fn at_module_level(&self) -> bool {
        self.scopes.len() == 1
    }

    fn kind_of(&self, id: ElementId) -> ElementKind {
        self.outline
            .get(id)
            .map_or(ElementKind::Module, |element| element.kind)
    }

    fn finish(mut self) -> Outline {
        while self.scopes.len() > 1 {
            self.pop_scope();
        }
        if !self.decorators.is_empty() {
            tracing::debug!(
                count = self.decorators.len(),
                line = self.decorators[0].line,
                "dropping decorators with no following definition"
            );
        }
        self.outline
    }
}

/// Kind of a `def` given the element it is nested in and its decorators.
fn classify_def(parent: ElementKind, decorators: &[String], is_async: bool) -> ElementKind {
    if parent == ElementKind::Class {
        if is_property(decorators) {
            ElementKind::Property
        } else if decorator_matches_any(decorators, &["classmethod"]) {
            ElementKind::Classmethod
        } else if decorator_matches_any(decorators, &["staticmethod"]) {
            ElementKind::Staticmethod
        } else {
            ElementKind::Method
        }
    } else if parent.is_function_like() {
        ElementKind::NestedFunction
    } else if is_context_manager(decorators) {
        ElementKind::ContextManager
    } else if is_async {
        ElementKind::AsyncFunction
    } else {
        ElementKind::Function
    }
}

fn column(line: &LogicalLine) -> u32 {
    u32::try_from(line.start - line.line_start).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
