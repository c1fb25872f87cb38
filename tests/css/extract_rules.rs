//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use stylestats::parsers::css::{extract_rules, Declaration};

    #[test]
    fn media_rules_are_flattened_one_level() {
        let statistics =
            extract_rules("@media screen { .a { color: red; } } .b { color: blue; }").unwrap();

        assert_eq!(statistics.rules.len(), 2);
        assert_eq!(statistics.media_queries, 1);
        assert_eq!(statistics.selectors, vec![".a", ".b"]);
    }

    #[test]
    fn counts_plain_and_media_grouped_rules() {
        let statistics = extract_rules(
            ".a{} .b{} .c{}
             @media print { .d{} .e{} }
             @media (min-width: 10em) { .f{} }",
        )
        .unwrap();

        assert_eq!(statistics.media_queries, 2);
        assert_eq!(statistics.rules.len(), 3 + 3);
        assert_eq!(statistics.selectors, vec![".a", ".b", ".c", ".d", ".e", ".f"]);
    }

    #[test]
    fn drops_rules_nested_deeper_than_media() {
        let statistics = extract_rules(
            "@supports (display: grid) { .z { display: grid } }
             @media screen {
                 @supports (display: grid) { .x { display: grid } }
                 .y { display: block }
             }",
        )
        .unwrap();

        assert_eq!(statistics.media_queries, 1);
        assert_eq!(statistics.selectors, vec![".y"]);
        assert_eq!(statistics.declarations.len(), 1);
    }

    #[test]
    fn other_at_rules_are_not_counted() {
        let statistics = extract_rules(
            "@font-face { font-family: x; src: url(x.woff) }
             @keyframes spin { to { transform: rotate(1turn) } }
             .a { animation: spin 1s }",
        )
        .unwrap();

        assert_eq!(statistics.rules.len(), 1);
        assert_eq!(statistics.media_queries, 0);
        assert_eq!(statistics.declarations.len(), 1);
    }

    #[test]
    fn declarations_keep_rule_order_and_skip_comments() {
        let statistics = extract_rules(
            ".a { color: red; /* note */ margin: 0 }
             @media print { .b { display: none } }
             .c { padding: 1px }",
        )
        .unwrap();

        let declared: Vec<(&str, &str)> = statistics
            .declarations
            .iter()
            .map(|Declaration { property, value }| (property.as_str(), value.as_str()))
            .collect();
        assert_eq!(
            declared,
            vec![
                ("color", "red"),
                ("margin", "0"),
                ("display", "none"),
                ("padding", "1px"),
            ]
        );
    }

    #[test]
    fn selector_lists_expand_in_order() {
        let statistics = extract_rules("h1, h2 { margin: 0 } p { margin: 0 }").unwrap();

        assert_eq!(statistics.selectors, vec!["h1", "h2", "p"]);
        assert_eq!(statistics.declarations.len(), 2);
    }

    #[test]
    fn selectors_with_functional_and_attribute_parts() {
        let statistics = extract_rules(
            "li:nth-child(2n), .b { color: red }
             a[href], b { color: blue }
             input[type=\"checkbox\" i]:checked, :where(.x, .y) > p { margin: 0 }",
        )
        .unwrap();

        assert_eq!(
            statistics.selectors,
            vec![
                "li:nth-child(2n)",
                ".b",
                "a[href]",
                "b",
                "input[type=\"checkbox\" i]:checked",
                ":where(.x, .y) > p",
            ]
        );
    }

    #[test]
    fn comments_are_not_part_of_selectors_or_values() {
        let statistics =
            extract_rules(".a /* c */, .b { margin: 0 /* top */ 1px; color: /* x */ red }").unwrap();

        assert_eq!(statistics.selectors, vec![".a", ".b"]);
        assert_eq!(
            statistics.declarations,
            vec![
                Declaration {
                    property: "margin".to_string(),
                    value: "0 1px".to_string(),
                },
                Declaration {
                    property: "color".to_string(),
                    value: "red".to_string(),
                },
            ]
        );
    }

    #[test]
    fn charset_only_sheet_is_not_empty() {
        let statistics = extract_rules("@charset \"utf-8\";").unwrap();

        assert!(statistics.rules.is_empty());
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use stylestats::error::StyleStatsError;
    use stylestats::parsers::css::extract_rules;

    #[test]
    fn comments_only() {
        assert!(matches!(
            extract_rules("/* nothing */"),
            Err(StyleStatsError::EmptyStylesheet)
        ));
    }

    #[test]
    fn empty_string() {
        assert!(matches!(
            extract_rules("  \n"),
            Err(StyleStatsError::EmptyStylesheet)
        ));
    }

    #[test]
    fn syntax_error() {
        assert!(matches!(
            extract_rules(".a { color: red } .b"),
            Err(StyleStatsError::CssSyntax { .. })
        ));
    }
}
