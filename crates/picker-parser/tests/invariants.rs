//! Structural guarantees that hold for every outline.

use picker_parser::{
    ElementId, Language, Outline, PickerGroup, Selection, extract, group_entries, picker_entries,
    summarize,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const FIXTURE: &str = include_str!("fixtures/elements.py");

const NESTED: &str = "\
import json
from .store import Store


@decorate
class Service(Store):
    \"\"\"Service doc.\"\"\"

    retries: int = 3

    def run(self):
        def step():
            yield 1

        for item in step():
            if item:
                def handler():
                    pass
        return None

    @property
    def name(self): return 'svc'


handler = lambda event: event


if __name__ == '__main__':
    Service().run()
";

fn outline_of(source: &str) -> Outline {
    let extraction = extract(source, Language::Python);
    assert!(extraction.errors.is_empty(), "{:?}", extraction.errors);
    extraction.outline
}

fn assert_tree_invariants(outline: &Outline) {
    let mut visited = 0;
    let mut pending = vec![ElementId::ROOT];
    while let Some(id) = pending.pop() {
        visited += 1;
        let parent = outline.get(id).expect("id from the tree");
        let children: Vec<_> = outline.children(id).collect();
        for (child_id, child) in &children {
            assert_eq!(child.parent, Some(id));
            assert!(
                parent.span.contains(&child.span),
                "{} does not contain {}",
                parent.name,
                child.name
            );
            assert!(child.span.start_line <= child.header_line);
            assert!(child.header_line < child.span.end_line);
            pending.push(*child_id);
        }
        for pair in children.windows(2) {
            let (_, first) = pair[0];
            let (_, second) = pair[1];
            assert!(
                !first.span.overlaps(&second.span),
                "{} overlaps {}",
                first.name,
                second.name
            );
            assert!(first.span.end_byte <= second.span.start_byte);
        }
    }
    assert_eq!(visited, outline.len());
    assert_eq!(outline.iter().count(), outline.len() - 1);
}

#[rstest]
#[case::fixture(FIXTURE)]
#[case::nested(NESTED)]
#[case::crlf("class A:\r\n    def m(self):\r\n        pass\r\n\r\ndef f():\r\n    pass\r\n")]
#[case::no_trailing_newline("def f():\n    return 1")]
fn spans_nest_and_siblings_never_overlap(#[case] source: &str) {
    assert_tree_invariants(&outline_of(source));
}

#[rstest]
#[case::fixture(FIXTURE)]
#[case::nested(NESTED)]
fn extraction_is_deterministic(#[case] source: &str) {
    let first = extract(source, Language::Python);
    let second = extract(source, Language::Python);
    assert_eq!(first.outline, second.outline);
    assert_eq!(first.errors, second.errors);
}

#[test]
fn nested_sample_structure() {
    let outline = outline_of(NESTED);
    let paths: Vec<_> = outline
        .iter()
        .map(|entry| (outline.qualified_name(entry.id), entry.depth))
        .collect();
    let expected = [
        ("Service", 0),
        ("Service.retries", 1),
        ("Service.run", 1),
        ("Service.run.step", 2),
        ("Service.run.handler", 2),
        ("Service.name", 1),
        ("handler", 0),
        ("__main__", 0),
    ];
    assert_eq!(
        paths,
        expected
            .iter()
            .map(|(path, depth)| ((*path).to_string(), *depth))
            .collect::<Vec<_>>()
    );
    let step = outline
        .find_path("Service.run.step")
        .and_then(|id| outline.get(id))
        .expect("step exists");
    assert!(step.is_generator);
    assert_eq!(outline.root().children.len(), 3);
}

#[test]
fn element_at_line_finds_the_innermost_element() {
    let outline = outline_of(FIXTURE);
    let at = |line| {
        outline
            .element_at_line(line)
            .map(|id| outline.qualified_name(id))
    };
    assert_eq!(at(84).as_deref(), Some("ApiClient.from_env"));
    assert_eq!(at(101).as_deref(), Some("outer_function.inner_function"));
    assert_eq!(at(6), None);
    assert_eq!(at(87), None);
}

#[test]
fn fold_ranges_cover_multi_line_elements() {
    let outline = outline_of(FIXTURE);
    let folds = outline.fold_ranges();
    assert!(folds.iter().all(|fold| fold.end_line > fold.start_line));
    let user = outline.find("User").expect("User exists");
    let fold = folds
        .iter()
        .find(|fold| fold.id == user)
        .expect("User folds");
    assert_eq!((fold.start_line, fold.end_line), (50, 56));
    assert!(!folds.iter().any(|fold| outline.find("API_URL") == Some(fold.id)));
}

#[test]
fn fixture_picker_groups() {
    let outline = outline_of(FIXTURE);
    let entries = picker_entries(&outline);
    let groups: Vec<_> = group_entries(&entries)
        .into_iter()
        .map(|(group, members)| (group, members.len()))
        .collect();
    assert_eq!(
        groups,
        vec![
            (PickerGroup::Functions, 7),
            (PickerGroup::Classes, 4),
            (PickerGroup::Methods, 12),
            (PickerGroup::Fields, 7),
        ]
    );

    let client = entries
        .iter()
        .find(|entry| entry.name == "ApiClient")
        .expect("ApiClient entry");
    assert_eq!(client.key, "class:ApiClient:59");
    assert_eq!(client.display_name, "ApiClient(BaseService)");
    assert_eq!(client.line_label, "L59-86");

    let helper = entries
        .iter()
        .find(|entry| entry.name == "helper_function")
        .expect("helper entry");
    assert_eq!(helper.display_name, "helper_function @staticmethod");
    assert_eq!(helper.key, "function:helper_function:28");
}

#[test]
fn fixture_selection_excerpts() {
    let outline = outline_of(FIXTURE);
    let entries = picker_entries(&outline);
    let mut selection = Selection::new();
    selection.toggle("lambda_binding:transform_data:95");
    selection.toggle("property:service_name:45");
    let excerpts = selection.excerpts(FIXTURE, &entries);
    let texts: Vec<_> = excerpts.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "    @property\n    def service_name(self) -> str:\n        return self.name",
            "transform_data = lambda x: {k.upper(): v for k, v in x.items()}",
        ]
    );
}

#[test]
fn fixture_skeleton() {
    let outline = outline_of(FIXTURE);
    assert_eq!(
        summarize(&outline),
        "imports: 5 ext\n\
         classes: BaseService (ABC):34, User @dataclass:51, ApiClient (BaseService):59, DatabaseConnection:105\n\
         fn: fetch_data:18, fetch_data_async:23, @staticmethod helper_function:29, paginate_results:89, outer_function:98"
    );
}
