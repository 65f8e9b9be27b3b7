use super::*;
use pretty_assertions::assert_eq;
use crate::Visibility;

#[test]
fn api_client_children_in_source_order() {
    let outline = outline_of(FIXTURE);
    let client = outline.find("ApiClient").expect("ApiClient exists");
    let kinds: Vec<_> = outline
        .children(client)
        .map(|(_, e)| (e.name.as_str(), e.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("__init__", ElementKind::Method),
            ("process", ElementKind::Method),
            ("get", ElementKind::Method),
            ("post", ElementKind::Method),
            ("from_env", ElementKind::Classmethod),
        ]
    );
}

#[test]
fn class_bases_and_signature() {
    let outline = outline_of(FIXTURE);
    let client = find_by_name(&outline, "ApiClient");
    assert_eq!(client.kind, ElementKind::Class);
    assert_eq!(client.bases, vec!["BaseService".to_string()]);
    assert_eq!(client.signature, "(BaseService)");
    assert_eq!(lines(client), (59, 86));

    let base = find_by_name(&outline, "BaseService");
    assert_eq!(base.bases, vec!["ABC".to_string()]);
    assert_eq!(lines(base), (34, 47));
}

#[test]
fn dataclass_fields_are_children() {
    let outline = outline_of(FIXTURE);
    let user_id = outline.find("User").expect("User exists");
    assert_eq!(child_names(&outline, user_id), vec!["id", "name", "email", "active"]);

    let active = outline
        .find_path("User.active")
        .and_then(|id| outline.get(id))
        .expect("active field");
    assert_eq!(active.kind, ElementKind::Field);
    assert_eq!(active.signature, "bool");
    assert_eq!(lines(active), (56, 56));
}

#[test]
fn instance_attributes_are_not_fields() {
    let outline = outline_of(FIXTURE);
    let init = outline.find_path("ApiClient.__init__").expect("__init__ exists");
    assert!(outline.children(init).next().is_none());
}

#[test]
fn context_manager_protocol_class_stays_a_class() {
    let outline = outline_of(FIXTURE);
    let db = outline.find("DatabaseConnection").expect("class exists");
    assert_eq!(outline.get(db).map(|e| e.kind), Some(ElementKind::Class));
    assert_eq!(
        child_names(&outline, db),
        vec!["__init__", "__enter__", "__exit__", "_connect"]
    );
    let connect = outline
        .find_path("DatabaseConnection._connect")
        .and_then(|id| outline.get(id))
        .expect("_connect exists");
    assert_eq!(connect.visibility, Visibility::Protected);
    assert_eq!(lines(connect), (120, 122));
}

#[test]
fn nested_classes_and_methods() {
    let source = "\
class Outer:
    class Inner:
        LIMIT = 1

        def method(self):
            pass

    def after(self):
        pass
";
    let outline = outline_of(source);
    let inner = outline.find_path("Outer.Inner").expect("Inner exists");
    assert_eq!(child_names(&outline, inner), vec!["LIMIT", "method"]);
    let method = outline.find_path("Outer.Inner.method").expect("method exists");
    assert_eq!(outline.get(method).map(|e| e.kind), Some(ElementKind::Method));
    assert_eq!(outline.qualified_name(method), "Outer.Inner.method");
    let outer = outline.find("Outer").expect("Outer exists");
    assert_eq!(child_names(&outline, outer), vec!["Inner", "after"]);
}

#[test]
fn class_defined_inside_a_function() {
    let outline = outline_of("def factory():\n    class Local:\n        def run(self):\n            pass\n    return Local\n");
    let local = outline.find_path("factory.Local").expect("Local exists");
    let run = outline.find_path("factory.Local.run").expect("run exists");
    assert_eq!(outline.get(local).map(|e| e.kind), Some(ElementKind::Class));
    assert_eq!(outline.get(run).map(|e| e.kind), Some(ElementKind::Method));
}

#[test]
fn one_line_class_has_no_block() {
    let outline = outline_of("class Empty: pass\nx = 1\n");
    let empty = find_by_name(&outline, "Empty");
    assert_eq!(lines(empty), (1, 1));
    assert!(empty.children.is_empty());
    assert_eq!(child_names(&outline, ElementId::ROOT), vec!["Empty", "x"]);
}

#[test]
fn methods_in_conditional_blocks_attach_to_the_class() {
    let source = "\
class Compat:
    if PY3:
        def text(self):
            pass
    else:
        def text(self):
            pass
";
    let outline = outline_of(source);
    let compat = outline.find("Compat").expect("class exists");
    assert_eq!(child_names(&outline, compat), vec!["text", "text"]);
}
