#[cfg(test)]
mod tests {
    use crate::intake::{
        object_path, sanitize_folder_name, ClientPayload, DocumentKind, DocumentSet,
        DocumentSource,
    };

    fn valid_documents() -> DocumentSet {
        let mut documents = DocumentSet::default();
        documents.set(
            DocumentKind::ProofOfResidence,
            DocumentSource::Url("https://example.com/conta.pdf".to_string()),
        );
        documents.set(
            DocumentKind::PhotoId,
            DocumentSource::Bytes {
                file_name: "rg.png".to_string(),
                content_type: "image/png".to_string(),
                data: vec![1, 2, 3],
            },
        );
        documents
    }

    fn valid_payload() -> ClientPayload {
        ClientPayload {
            full_name: "Maria Souza".to_string(),
            cpf: "12345678901".to_string(),
            email: "maria@example.com".to_string(),
            phone: "11987654321".to_string(),
            documents: valid_documents(),
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn cpf_must_have_exactly_11_digits() {
        let mut payload = valid_payload();
        payload.cpf = "123456789".to_string();
        let errors = payload.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "cpf"));

        payload.cpf = "1234567890a".to_string();
        assert!(payload.validate().is_err());

        payload.cpf = String::new();
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.iter().filter(|e| e.field == "cpf").count(), 1);
    }

    #[test]
    fn email_shape_is_checked() {
        let mut payload = valid_payload();
        for bad in ["not-an-email", "a@b", "a b@c.com", "@x.com", "a@.com"] {
            payload.email = bad.to_string();
            assert!(payload.validate().is_err(), "{} should be rejected", bad);
        }
        payload.email = "cliente@escritorio.adv.br".to_string();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn phone_needs_area_code_plus_8_or_9_digits() {
        let mut payload = valid_payload();
        payload.phone = "1187654321".to_string(); // 10 digits
        assert!(payload.validate().is_ok());
        payload.phone = "119876543210".to_string(); // 12 digits
        assert!(payload.validate().is_err());
        payload.phone = "11 98765432".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn name_accepts_accents_but_not_digits() {
        let mut payload = valid_payload();
        payload.full_name = "José da Conceição".to_string();
        assert!(payload.validate().is_ok());
        payload.full_name = "Maria 2".to_string();
        assert!(payload.validate().is_err());
        payload.full_name = "x".repeat(51);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn required_documents_are_enforced() {
        let mut payload = valid_payload();
        payload.documents.proof_of_residence = None;
        let errors = payload.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "proof_of_residence"));

        // the third slot is optional
        let mut payload = valid_payload();
        payload.documents.other_documents = None;
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn folder_name_strips_diacritics_and_collapses_whitespace() {
        assert_eq!(sanitize_folder_name("José   da Silva"), "Jose_da_Silva");
        assert_eq!(sanitize_folder_name("Conceição Ávila"), "Conceicao_Avila");
        assert_eq!(sanitize_folder_name("  O'Brien & Cia.  "), "OBrien_Cia");
        assert_eq!(sanitize_folder_name("Ana-Luíza"), "Ana-Luiza");
    }

    #[test]
    fn object_path_follows_the_convention() {
        let path = object_path(
            "José da Silva",
            DocumentKind::PhotoId,
            1717689600000,
            "rg.png",
        );
        assert_eq!(path, "Jose_da_Silva/photo_id-1717689600000-rg.png");
    }

    #[test]
    fn document_kind_field_names_round_trip() {
        for kind in DocumentKind::ALL {
            assert_eq!(DocumentKind::from_field_name(kind.field_name()), Some(kind));
        }
        assert_eq!(DocumentKind::from_field_name("resume"), None);
    }
}
