// --- File: crates/agenda_scheduling/src/intake.rs ---
//! Client intake payload and its validation.
//!
//! Field rules match the office intake form: full name, CPF, e-mail and
//! phone are required and format-checked before any network activity;
//! proof of residence and photo id documents are required, the third
//! document slot is optional. Document slots are a fixed enumeration,
//! never free-form keys.

use serde::{Deserialize, Serialize};

/// The fixed document slots a client may attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    ProofOfResidence,
    PhotoId,
    OtherDocuments,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::ProofOfResidence,
        DocumentKind::PhotoId,
        DocumentKind::OtherDocuments,
    ];

    /// Stable field name, used in object paths and request payloads.
    pub fn field_name(&self) -> &'static str {
        match self {
            DocumentKind::ProofOfResidence => "proof_of_residence",
            DocumentKind::PhotoId => "photo_id",
            DocumentKind::OtherDocuments => "other_documents",
        }
    }

    pub fn from_field_name(name: &str) -> Option<DocumentKind> {
        match name {
            "proof_of_residence" => Some(DocumentKind::ProofOfResidence),
            "photo_id" => Some(DocumentKind::PhotoId),
            "other_documents" => Some(DocumentKind::OtherDocuments),
            _ => None,
        }
    }

    /// Whether a booking may proceed without this document.
    pub fn required(&self) -> bool {
        !matches!(self, DocumentKind::OtherDocuments)
    }
}

/// One attached document: raw bytes still to be uploaded, or a URL of an
/// already-persisted object which is passed through untouched.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Bytes {
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
    Url(String),
}

/// The fixed per-slot document mapping.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    pub proof_of_residence: Option<DocumentSource>,
    pub photo_id: Option<DocumentSource>,
    pub other_documents: Option<DocumentSource>,
}

impl DocumentSet {
    pub fn get(&self, kind: DocumentKind) -> Option<&DocumentSource> {
        match kind {
            DocumentKind::ProofOfResidence => self.proof_of_residence.as_ref(),
            DocumentKind::PhotoId => self.photo_id.as_ref(),
            DocumentKind::OtherDocuments => self.other_documents.as_ref(),
        }
    }

    pub fn set(&mut self, kind: DocumentKind, source: DocumentSource) {
        match kind {
            DocumentKind::ProofOfResidence => self.proof_of_residence = Some(source),
            DocumentKind::PhotoId => self.photo_id = Some(source),
            DocumentKind::OtherDocuments => self.other_documents = Some(source),
        }
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// The structured client payload handed to the submission flow.
#[derive(Debug, Clone)]
pub struct ClientPayload {
    pub full_name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub documents: DocumentSet,
}

impl ClientPayload {
    /// Field-level validation. All failures are collected so the caller
    /// can surface every problem at once; validation errors never reach
    /// the network.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.full_name.trim().is_empty() {
            errors.push(FieldError::new("full_name", "Full name is required."));
        } else if self.full_name.chars().count() > 50 {
            errors.push(FieldError::new(
                "full_name",
                "Full name must be at most 50 characters.",
            ));
        } else if !self
            .full_name
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace())
        {
            errors.push(FieldError::new(
                "full_name",
                "Full name may contain only letters and spaces.",
            ));
        }

        if self.cpf.is_empty() {
            errors.push(FieldError::new("cpf", "CPF is required."));
        } else if self.cpf.len() != 11 || !self.cpf.chars().all(|c| c.is_ascii_digit()) {
            errors.push(FieldError::new("cpf", "CPF must contain exactly 11 digits."));
        }

        if self.email.is_empty() {
            errors.push(FieldError::new("email", "E-mail is required."));
        } else if !is_plausible_email(&self.email) {
            errors.push(FieldError::new("email", "Invalid e-mail format."));
        }

        if self.phone.is_empty() {
            errors.push(FieldError::new("phone", "Phone is required."));
        } else if !(10..=11).contains(&self.phone.len())
            || !self.phone.chars().all(|c| c.is_ascii_digit())
        {
            errors.push(FieldError::new(
                "phone",
                "Phone must contain area code plus 8 or 9 digits.",
            ));
        }

        for kind in DocumentKind::ALL {
            if kind.required() && self.documents.get(kind).is_none() {
                errors.push(FieldError::new(kind.field_name(), "Document is required."));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// local@domain.tld shape with no whitespace. Deliverability is the
/// mail server's problem, not ours.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Sanitize a client name into a storage folder name: diacritics folded,
/// non-word characters dropped, whitespace runs collapsed to a single
/// underscore. Case is preserved.
pub fn sanitize_folder_name(name: &str) -> String {
    name.chars()
        .map(fold_diacritic)
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '_' || *c == '-')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Storage object path: `{sanitized-client-name}/{field}-{timestamp}-{filename}`.
pub fn object_path(
    client_name: &str,
    kind: DocumentKind,
    timestamp_millis: i64,
    file_name: &str,
) -> String {
    format!(
        "{}/{}-{}-{}",
        sanitize_folder_name(client_name),
        kind.field_name(),
        timestamp_millis,
        file_name
    )
}

/// Fold the Latin-1 accented characters that show up in Brazilian names.
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        _ => c,
    }
}
