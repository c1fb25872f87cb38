use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use stylestats::network::response::FetchedResponse;
use url::Url;

fn response(content_type: Option<&'static str>, body: &str) -> FetchedResponse {
    let mut headers = HeaderMap::new();
    if let Some(content_type) = content_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }

    FetchedResponse::new(
        200,
        headers,
        body.to_string(),
        Url::parse("https://example.com/resource").unwrap(),
    )
}

//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use stylestats::parsers::content::{classify, ContentKind};

    use super::response;

    #[test]
    fn sniffed_css_wins_over_header() {
        let fetched = response(Some("text/html; charset=utf-8"), ".a { color: red; }");

        assert_eq!(classify(&fetched).unwrap(), ContentKind::Css);
    }

    #[test]
    fn sniffed_css_without_header() {
        let fetched = response(None, "@import url(base.css);");

        assert_eq!(classify(&fetched).unwrap(), ContentKind::Css);
    }

    #[test]
    fn html_by_header() {
        let fetched = response(Some("text/html"), "<html><body></body></html>");

        assert_eq!(classify(&fetched).unwrap(), ContentKind::Html);
    }

    #[test]
    fn xhtml_by_header() {
        let fetched = response(Some("application/xhtml+xml"), "<html/>");

        assert_eq!(classify(&fetched).unwrap(), ContentKind::Html);
    }

    #[test]
    fn css_by_header_when_sniff_fails() {
        let fetched = response(Some("Text/CSS"), "/* intentionally empty */");

        assert_eq!(classify(&fetched).unwrap(), ContentKind::Css);
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
    use stylestats::parsers::content::classify;

    use super::response;

    #[test]
    fn json_body() {
        let fetched = response(Some("application/json"), "{\"a\": 1}");

        match classify(&fetched) {
            Err(StyleStatsError::UnsupportedContentType { content_type, .. }) => {
                assert_eq!(content_type, "application/json")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_header() {
        let fetched = response(None, "plain words");

        assert!(matches!(
            classify(&fetched),
            Err(StyleStatsError::UnsupportedContentType { .. })
        ));
    }
}
