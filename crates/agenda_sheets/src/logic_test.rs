#[cfg(test)]
mod tests {
    use crate::logic::{script_url, SheetsError};
    use crate::service::SheetsNotifier;
    use agenda_config::SheetsConfig;

    #[test]
    fn https_script_url_is_accepted() {
        let config = SheetsConfig {
            script_url: "https://script.google.com/macros/s/abc/exec".to_string(),
        };
        assert_eq!(
            script_url(&config).unwrap(),
            "https://script.google.com/macros/s/abc/exec"
        );
        assert!(SheetsNotifier::from_config(&config).is_ok());
    }

    #[test]
    fn placeholder_url_disables_the_export() {
        // an unconfigured endpoint means no export, not a broken one
        let config = SheetsConfig {
            script_url: "PASTE_SCRIPT_URL_HERE".to_string(),
        };
        let err = script_url(&config).unwrap_err();
        assert!(matches!(err, SheetsError::ConfigError(_)));
        assert!(SheetsNotifier::from_config(&config).is_err());
    }
}
