#[cfg(test)]
mod formatting_tests {
    use crate::{
        EntityKind, InterfaceParser, NdrFormatter, NdrInterface, RenderContext, RenderedDocument,
    };

    const DEMO_INTERFACE: &str = r#"{
        "name": "Demo",
        "uuid": "12345678-1234-abcd-ef00-0123456789ab",
        "version": "1.0",
        "complex_types": [
            { "struct": { "name": "Struct_0", "members": [
                { "name": "Count", "offset": 0, "type": { "base": "long" } },
                { "name": "Items", "offset": 8, "type": { "pointer": { "kind": "unique",
                    "referent": { "complex": { "name": "Union_1", "kind": "union" } } } } },
                { "name": "Tail", "offset": 16, "type": { "array": { "element": { "base": "byte" }, "count": 4 } } }
            ] } },
            { "union": { "name": "Union_1", "arms": [
                { "name": "Arm_1", "case": 1, "type": { "base": "hyper" } },
                { "name": "Arm_Default", "type": { "string": { "wide": true } } }
            ] } }
        ],
        "procedures": [
            { "name": "Proc0", "proc_num": 0, "params": [
                { "name": "p0", "attributes": ["in"], "type": "context_handle" },
                { "name": "p1", "attributes": ["in", "out"], "type": { "pointer": { "kind": "ref",
                    "referent": { "complex": { "name": "Struct_0", "kind": "struct" } } } } }
            ], "return_type": { "base": "long" } },
            { "name": "Proc1", "proc_num": 1 }
        ]
    }"#;

    fn demo() -> NdrInterface {
        InterfaceParser::parse_str(DEMO_INTERFACE).unwrap()
    }

    #[test]
    fn test_interface_layout() {
        let interface = demo();
        let builder = NdrFormatter::default().format_interface(&interface).unwrap();

        let expected = "\
[uuid(12345678-1234-abcd-ef00-0123456789ab), version(1.0)]
interface Demo {
    struct Struct_0 {
        /* Offset: 0 */ long Count;
        /* Offset: 8 */ [unique] union Union_1* Items;
        /* Offset: 16 */ byte Tail[4];
    };

    union Union_1 {
        /* case 1 */ hyper Arm_1;
        /* default */ [string] wchar_t* Arm_Default;
    };

    long Proc0([in, context_handle] void* p0, [in, out] struct Struct_0* p1);
    void Proc1();
}
";
        assert_eq!(builder.text(), expected);
    }

    #[test]
    fn test_interface_tags() {
        let interface = demo();
        let builder = NdrFormatter::default().format_interface(&interface).unwrap();

        let tags: Vec<(&str, EntityKind)> = builder
            .tags()
            .iter()
            .map(|tag| (tag.entity().name(), tag.entity().kind()))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("Demo", EntityKind::Interface),
                ("Struct_0", EntityKind::Structure),
                ("Count", EntityKind::Member),
                ("Union_1", EntityKind::TypeReference),
                ("Items", EntityKind::Member),
                ("Tail", EntityKind::Member),
                ("Union_1", EntityKind::Union),
                ("Arm_1", EntityKind::Member),
                ("Arm_Default", EntityKind::Member),
                ("Proc0", EntityKind::Procedure),
                ("p0", EntityKind::Parameter),
                ("Struct_0", EntityKind::TypeReference),
                ("p1", EntityKind::Parameter),
                ("Proc1", EntityKind::Procedure),
            ]
        );

        assert_eq!(builder.tags()[0].offset(), 69);
        assert_eq!(builder.tags()[1].offset(), 87);
        for tag in builder.tags() {
            assert_eq!(&builder.text()[tag.offset()..tag.end()], tag.entity().name());
        }
        assert!(builder.tags().windows(2).all(|w| w[0].offset() <= w[1].offset()));
    }

    #[test]
    fn test_complex_types_with_narrow_indent_and_no_offsets() {
        let interface = demo();
        let mut context = RenderContext::new().with_indent_width(2);
        context.show_offsets = false;
        let builder = NdrFormatter::new(context).format_complex_types(&interface).unwrap();

        let expected = "\
struct Struct_0 {
  long Count;
  [unique] union Union_1* Items;
  byte Tail[4];
};

union Union_1 {
  /* case 1 */ hyper Arm_1;
  /* default */ [string] wchar_t* Arm_Default;
};
";
        assert_eq!(builder.text(), expected);
    }

    #[test]
    fn test_procedures_with_numbers() {
        let interface = demo();
        let mut context = RenderContext::new();
        context.show_proc_numbers = true;
        let builder = NdrFormatter::new(context).format_procedures(&interface).unwrap();

        assert_eq!(
            builder.text(),
            "/* Proc 0 */ long Proc0([in, context_handle] void* p0, [in, out] struct Struct_0* p1);\n\
             /* Proc 1 */ void Proc1();\n"
        );
        assert_eq!(builder.tags()[0].offset(), "/* Proc 0 */ long ".len());
    }

    #[test]
    fn test_rendered_document_json() {
        let interface = demo();
        let builder = NdrFormatter::default().format_procedures(&interface).unwrap();
        let document = RenderedDocument::from_builder(&builder);

        for tag in &document.tags {
            assert_eq!(document.tagged_text(tag), Some(tag.name.as_str()));
        }

        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["tags"][0]["name"], "Proc0");
        assert_eq!(json["tags"][0]["kind"], "procedure");
        assert_eq!(json["tags"][2]["kind"], "type_reference");
        assert_eq!(json["text"].as_str(), Some(document.text.as_str()));
    }

    #[test]
    fn test_empty_interface() {
        let interface =
            InterfaceParser::parse_str(r#"{ "name": "Empty", "uuid": "0", "version": "2.1" }"#).unwrap();
        let builder = NdrFormatter::default().format_interface(&interface).unwrap();
        assert_eq!(builder.text(), "[uuid(0), version(2.1)]\ninterface Empty {\n}\n");
        assert_eq!(builder.tags().len(), 1);
        assert_eq!(builder.tags()[0].entity().kind(), EntityKind::Interface);
        assert_eq!(builder.tags()[0].offset(), "[uuid(0), version(2.1)]\ninterface ".len());
    }

    #[test]
    fn test_type_references_with_keyword_fragment_names() {
        let json = r#"{
            "name": "n",
            "uuid": "u",
            "complex_types": [
                { "struct": { "name": "s", "members": [
                    { "name": "x", "offset": 0, "type": { "pointer": {
                        "referent": { "complex": { "name": "u", "kind": "union" } } } } },
                    { "name": "y", "offset": 8, "type": { "array": {
                        "element": { "complex": { "name": "t", "kind": "struct" } }, "count": 2 } } }
                ] } },
                { "struct": { "name": "t" } },
                { "union": { "name": "u", "arms": [
                    { "name": "a", "case": 1, "type": { "complex": { "name": "ruct", "kind": "struct" } } }
                ] } },
                { "struct": { "name": "ruct" } }
            ],
            "procedures": [
                { "name": "P", "params": [
                    { "name": "a", "attributes": ["in"], "type": { "pointer": { "kind": "ref",
                        "referent": { "complex": { "name": "s", "kind": "struct" } } } } }
                ], "return_type": { "pointer": { "referent": { "complex": { "name": "u", "kind": "union" } } } } }
            ]
        }"#;
        let interface = InterfaceParser::parse_str(json).unwrap();
        let builder = NdrFormatter::default().format_interface(&interface).unwrap();
        let text = builder.text();

        let references: Vec<_> = builder
            .tags()
            .iter()
            .filter(|tag| tag.entity().kind() == EntityKind::TypeReference)
            .collect();
        assert_eq!(references.len(), 5);

        for tag in references {
            let name = tag.entity().name();
            assert_eq!(&text[tag.offset()..tag.end()], name);
            let keyword = interface.complex_type(name).map(|ty| ty.complex_kind().keyword()).unwrap();
            let prefix = format!("{} ", keyword);
            assert_eq!(&text[tag.offset() - prefix.len()..tag.offset()], prefix, "tag for {}", name);
        }

        assert!(text.contains("    union u* P([in] struct s* a);\n"), "{}", text);
    }
}
