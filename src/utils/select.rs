use crate::errors::AdsError;
use serde_json::Value;

/// Terminal input seam so the selection flows stay testable off a tty.
pub trait PromptInput: Send {
    fn read_index(&mut self, prompt: &str) -> Result<i64, AdsError>;
    fn read_line(&mut self, prompt: &str) -> Result<String, AdsError>;
}

/// Production prompt backed by dialoguer.
pub struct TermPrompt;

impl PromptInput for TermPrompt {
    fn read_index(&mut self, prompt: &str) -> Result<i64, AdsError> {
        dialoguer::Input::<i64>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|err| AdsError::internal(format!("Prompt failed: {}", err)))
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, AdsError> {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|err| AdsError::internal(format!("Prompt failed: {}", err)))
    }
}

/// 1-based numbered menu over `options` labeled by `display_field`. Zero
/// candidates is an error, a lone candidate is picked without prompting,
/// anything else re-prompts until the reply lands in `1..=len`.
pub fn select_option(
    options: &[Value],
    display_field: &str,
    prompt: &str,
    element: &str,
    input: &mut dyn PromptInput,
) -> Result<Value, AdsError> {
    if options.is_empty() {
        return Err(AdsError::no_options(element));
    }
    if options.len() == 1 {
        return Ok(options[0].clone());
    }
    loop {
        for (position, option) in options.iter().enumerate() {
            let label = option
                .get(display_field)
                .and_then(Value::as_str)
                .unwrap_or("<unnamed>");
            println!("{}) {}", position + 1, label);
        }
        let choice = input.read_index(&format!("{} (1-{})", prompt, options.len()))?;
        if choice >= 1 && (choice as usize) <= options.len() {
            return Ok(options[choice as usize - 1].clone());
        }
    }
}
