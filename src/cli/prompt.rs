use anyhow::Result;
use inquire::error::InquireResult;
use inquire::{InquireError, Text};

/// Answer to one form prompt; Esc and Ctrl-C cancel the whole form
#[derive(Debug, PartialEq, Eq)]
pub enum FormResult<T> {
    Value(T),
    Cancelled,
}

/// Prompt for a field, showing `current` when there is one.
/// An empty answer keeps the current value and `-` clears it.
pub fn prompt_field(field: &str, current: Option<&str>) -> Result<FormResult<String>> {
    let prompt = match current {
        Some(val) if !val.is_empty() => format!("{} [{}] (- clears):", field, val),
        _ => format!("{}:", field),
    };

    Ok(match form_answer(Text::new(&prompt).prompt())? {
        FormResult::Value(input) => FormResult::Value(resolve_answer(&input, current)),
        FormResult::Cancelled => FormResult::Cancelled,
    })
}

fn form_answer(result: InquireResult<String>) -> Result<FormResult<String>> {
    match result {
        Ok(input) => Ok(FormResult::Value(input)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

fn resolve_answer(input: &str, current: Option<&str>) -> String {
    let current = current.unwrap_or("");
    match input.trim() {
        "-" if !current.is_empty() => String::new(),
        "" => current.to_string(),
        answer => answer.to_string(),
    }
}
