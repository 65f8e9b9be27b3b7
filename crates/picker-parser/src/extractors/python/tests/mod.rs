use super::*;

mod classes;
mod decorators;

const FIXTURE: &str = include_str!("../../../../tests/fixtures/elements.py");

fn extract_source(source: &str) -> Extraction {
    extract(source, &ExtractOptions::default())
}

fn outline_of(source: &str) -> Outline {
    let extraction = extract_source(source);
    assert!(
        extraction.errors.is_empty(),
        "unexpected errors: {:?}",
        extraction.errors
    );
    extraction.outline
}

fn find_by_name<'a>(outline: &'a Outline, name: &str) -> &'a Element {
    outline
        .find(name)
        .and_then(|id| outline.get(id))
        .unwrap_or_else(|| panic!("no element named '{name}' found"))
}

fn child_names(outline: &Outline, id: ElementId) -> Vec<&str> {
    outline
        .children(id)
        .map(|(_, element)| element.name.as_str())
        .collect()
}

fn lines(element: &Element) -> (u32, u32) {
    (element.span.start_line, element.last_line())
}
