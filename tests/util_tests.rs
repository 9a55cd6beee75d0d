#[cfg(test)]
mod cookie_tests {
    use gymweg::util::extract_session_cookies;

    #[test]
    pub fn test_keeps_only_session_cookies() {
        let set_cookies = [
            "ASP.NET_SessionId=w3k1qz; path=/; HttpOnly",
            "__cfduid=d41d8cd98f; expires=Fri, 01-Jan-2027 00:00:00 GMT; path=/",
            "LegendOnlineAffinity=7f1c; path=/; HttpOnly",
            "Responsive=1; path=/",
            "_ga=GA1.3.1; path=/",
        ];

        assert_eq!(
            "ASP.NET_SessionId=w3k1qz; LegendOnlineAffinity=7f1c; Responsive=1; \
APP_LGD_COOKIE_TEST=true",
            extract_session_cookies(&set_cookies)
        );
    }

    #[test]
    pub fn test_keeps_header_order() {
        let set_cookies = [
            "Responsive=1; path=/",
            "ASP.NET_SessionId=abc; path=/",
        ];

        assert_eq!(
            "Responsive=1; ASP.NET_SessionId=abc; APP_LGD_COOKIE_TEST=true",
            extract_session_cookies(&set_cookies)
        );
    }

    #[test]
    pub fn test_no_cookies() {
        let set_cookies: [&str; 0] = [];
        assert_eq!(
            "APP_LGD_COOKIE_TEST=true",
            extract_session_cookies(&set_cookies)
        );
    }

    #[test]
    pub fn test_server_cookie_test_flag_is_kept() {
        let set_cookies = ["APP_LGD_COOKIE_TEST=true; path=/"];
        assert_eq!(
            "APP_LGD_COOKIE_TEST=true; APP_LGD_COOKIE_TEST=true",
            extract_session_cookies(&set_cookies)
        );
    }

    #[test]
    pub fn test_attributes_are_never_kept() {
        // Only the first segment counts, even if an attribute looks like a session cookie.
        let set_cookies = ["tracking=1; Responsive=1; path=/"];
        assert_eq!(
            "APP_LGD_COOKIE_TEST=true",
            extract_session_cookies(&set_cookies)
        );
    }

    #[test]
    pub fn test_name_must_match_exactly() {
        let set_cookies = [
            "ASP.NET_SessionId_old=abc; path=/",
            "NotResponsive=1; path=/",
            " Responsive=2 ; path=/",
        ];
        assert_eq!(
            "Responsive=2; APP_LGD_COOKIE_TEST=true",
            extract_session_cookies(&set_cookies)
        );
    }
}

#[cfg(test)]
mod cache_buster_tests {
    use gymweg::util::get_cache_buster;

    #[test]
    pub fn test_cache_buster_in_range() {
        for _ in 0..100 {
            let value = get_cache_buster().parse::<f64>().unwrap();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
