use plugboard_derive::plugboard_error;

#[plugboard_error]
pub enum LookupError {
    #[error("Nothing configured")]
    NotConfigured,

    #[error("Unknown entry: {name}")]
    Unknown { name: String },
}

fn main() {
    let err = Err::<(), _>(LookupError::NotConfigured).context("ignored").unwrap_err();
    assert_eq!(err.to_string(), "Nothing configured");

    let err = LookupError::Unknown { name: "FileStore".to_owned() };
    assert_eq!(err.to_string(), "Unknown entry: FileStore");
}
