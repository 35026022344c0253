//! The API client against a local HTTP server.

#[cfg(test)]
mod client_http_tests {
    use mockito::{Matcher, Server, ServerGuard};
    use rackapi::transport::HttpTransport;
    use rackapi::{ApiClient, Settings, WireFormat};
    use url::Url;

    const HASHED_PASSWORD: &str = "5f4dcc3b5aa765d61d8327deb882cf99";

    fn settings(server: &ServerGuard) -> Settings {
        let api = Url::parse(&format!("{}/api/", server.url())).unwrap();
        Settings::new(api)
            .with_username("test")
            .with_password("password")
    }

    fn client(format: WireFormat) -> ApiClient {
        ApiClient::new(
            format,
            HttpTransport::with_timeout(5).unwrap(),
            tracing::Span::none(),
        )
    }

    #[test]
    fn test_json_login_and_rack_collection() {
        let mut server = Server::new();
        let login = server
            .mock("POST", "/api/account/login")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("userName".into(), "test".into()),
                Matcher::UrlEncoded("password".into(), HASHED_PASSWORD.into()),
            ]))
            .match_header("accept", "application/json")
            .match_header("content-type", "application/json")
            .match_header("user-agent", "6sigma")
            .match_header("token", Matcher::Missing)
            .match_body(Matcher::Exact(String::new()))
            .with_status(200)
            .with_body(r#"{"token":"abc123"}"#)
            .create();
        let racks = server
            .mock("GET", "/api/asset/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "rack".into()),
                Matcher::UrlEncoded("filterOn".into(), "type".into()),
                Matcher::UrlEncoded("power,location".into(), String::new()),
            ]))
            .match_header("token", "abc123")
            .with_status(200)
            .with_body(r#"{"asset":[{"id":17,"power":"on","location":"dc1"}]}"#)
            .create();

        let client = client(WireFormat::Json);
        let mut settings = settings(&server);

        assert!(client.login(&mut settings));
        assert_eq!(settings.token(), Some("abc123"));

        let collection = client.retrieve_rack_collection(&settings).unwrap();
        assert_eq!(client.first_asset_id(&collection), Some("17".to_string()));

        login.assert();
        racks.assert();
    }

    #[test]
    fn test_xml_rack_contents_and_asset() {
        let mut server = Server::new();
        let contents = server
            .mock("GET", "/api/asset/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("parent".into(), "17".into()),
                Matcher::UrlEncoded("filterOn".into(), "parent".into()),
            ]))
            .match_header("accept", "application/xml")
            .with_status(200)
            .with_body("<assets><asset><id>30</id></asset></assets>")
            .create();
        let asset = server
            .mock("GET", "/api/asset/17")
            .match_header("accept", "application/xml")
            .with_status(200)
            .with_body("<asset><id>17</id><name>Rack 1</name></asset>")
            .create();

        let client = client(WireFormat::Xml);
        let settings = settings(&server);

        let rack_contents = client.retrieve_rack_contents(&settings, "17").unwrap();
        assert_eq!(
            rack_contents.select_text("/assets/asset/id"),
            Some("30".to_string())
        );

        let rack = client.retrieve_asset(&settings, "17").unwrap();
        assert_eq!(rack.select_text("/asset/name"), Some("Rack 1".to_string()));

        contents.assert();
        asset.assert();
    }

    #[test]
    fn test_not_found_yields_absence() {
        let mut server = Server::new();
        let missing = server
            .mock("GET", "/api/asset/99")
            .with_status(404)
            .with_body("not found")
            .create();

        let client = client(WireFormat::Json);
        assert!(client.retrieve_asset(&settings(&server), "99").is_none());
        missing.assert();
    }

    #[test]
    fn test_unparsable_body_yields_absence() {
        let mut server = Server::new();
        server
            .mock("GET", "/api/asset/1")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create();

        let client = client(WireFormat::Json);
        assert!(client.retrieve_asset(&settings(&server), "1").is_none());
    }

    #[test]
    fn test_login_without_token_leaves_settings_unset() {
        let mut server = Server::new();
        server
            .mock("POST", "/api/account/login")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<user><name>test</name></user>")
            .create();

        let client = client(WireFormat::Xml);
        let mut settings = settings(&server);

        assert!(!client.login(&mut settings));
        assert!(settings.token().is_none());
    }

    #[test]
    fn test_connection_refused_yields_absence() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let api = Url::parse(&format!("http://127.0.0.1:{}/api/", port)).unwrap();
        let mut settings = Settings::new(api).with_username("test");

        let client = client(WireFormat::Json);
        assert!(!client.login(&mut settings));
        assert!(client.retrieve_rack_collection(&settings).is_none());
    }
}
