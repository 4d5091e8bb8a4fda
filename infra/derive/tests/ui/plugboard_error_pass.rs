use plugboard_derive::plugboard_error;
use std::borrow::Cow;

#[plugboard_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    let missing: Result<(), std::io::Error> = Err(std::io::Error::other("gone"));
    missing.context("Reading manifest")?;
    Ok(())
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (Reading manifest): gone");

    let internal: DemoError = "boom".into();
    let internal = Err::<(), _>(internal).context("late").unwrap_err();
    assert_eq!(internal.to_string(), "Internal error (late): boom");
}
