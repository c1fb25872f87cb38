//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use stylestats::utils::url::{resolve_url, Url};

    #[test]
    fn relative_file() {
        let base_url = Url::parse("https://example.com/page").unwrap();

        assert_eq!(
            resolve_url(&base_url, "a.css").unwrap().as_str(),
            "https://example.com/a.css"
        );
    }

    #[test]
    fn parent_directory() {
        let base_url = Url::parse("https://example.com/a/b/c.html").unwrap();

        assert_eq!(
            resolve_url(&base_url, "../d.css").unwrap().as_str(),
            "https://example.com/a/d.css"
        );
    }

    #[test]
    fn protocol_relative() {
        let base_url = Url::parse("http://example.com/").unwrap();

        assert_eq!(
            resolve_url(&base_url, "//cdn.example.com/x.css").unwrap().as_str(),
            "http://cdn.example.com/x.css"
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let base_url = Url::parse("https://example.com/").unwrap();

        assert_eq!(
            resolve_url(&base_url, "  style.css\n").unwrap().as_str(),
            "https://example.com/style.css"
        );
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
    use stylestats::utils::url::{resolve_url, Url};

    #[test]
    fn invalid_port() {
        let base_url = Url::parse("https://example.com/").unwrap();

        assert!(resolve_url(&base_url, "http://example.com:99999/a.css").is_err());
    }
}
