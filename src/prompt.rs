// Line prompts and menus: validated free-text input, the select-with-add
// loop, and the fixed action menu. The select-with-add engine is pure and
// driven by a round function so it can run against a scripted round in tests.

use dialoguer::{Input, Select};

use crate::ui::UiError;

/// Label and validation message for one prompt interaction.
#[derive(Debug, Clone)]
pub struct PromptSpec {
    pub label: String,
    pub error: String,
}

impl PromptSpec {
    pub fn new(label: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            error: error.into(),
        }
    }
}

/// One entry of the action menu: display name plus the discriminator the
/// workflow dispatches on.
#[derive(Debug, Clone)]
pub struct ActionItem {
    pub name: String,
    pub value: i32,
}

impl ActionItem {
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// What one presentation round of the extensible choice came back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Index into the option list the round was shown.
    Picked(usize),
    /// The user chose "Other" and typed a new value.
    Added(String),
}

/// Drive the select-with-add loop: present the working options, and when the
/// user adds a value, rebuild the list (seed plus accumulated additions) and
/// present again. Free text is only ever returned after the user re-selects
/// it from the extended list.
pub fn run_select_with_add<F>(seed: &[String], mut round: F) -> Result<String, UiError>
where
    F: FnMut(&[String]) -> Result<SelectOutcome, UiError>,
{
    let mut added: Vec<String> = Vec::new();
    loop {
        let working: Vec<String> = seed.iter().chain(added.iter()).cloned().collect();
        match round(&working)? {
            SelectOutcome::Picked(index) => return Ok(working[index].clone()),
            SelectOutcome::Added(value) => added.push(value),
        }
    }
}

/// Single-line input that re-prompts until the value is non-empty. The
/// default pre-fills the line when it is not empty itself.
pub fn input(spec: &PromptSpec, default: &str) -> Result<String, UiError> {
    let mut prompt = Input::<String>::new();
    prompt.with_prompt(spec.label.as_str());
    if !default.is_empty() {
        prompt.with_initial_text(default);
    }
    let error = spec.error.clone();
    prompt.validate_with(move |value: &String| -> Result<(), String> {
        if value.trim().is_empty() {
            Err(error.clone())
        } else {
            Ok(())
        }
    });
    Ok(prompt.interact_text()?)
}

/// One terminal-backed round of the extensible choice: the options plus a
/// synthetic "Other" entry; picking "Other" asks for the new value.
pub fn select_round(spec: &PromptSpec, options: &[String]) -> Result<SelectOutcome, UiError> {
    let mut items: Vec<String> = options.to_vec();
    items.push("Other".to_string());
    let choice = Select::new()
        .with_prompt(spec.label.as_str())
        .items(&items)
        .default(0)
        .interact()?;
    if choice == options.len() {
        let value = input(spec, "")?;
        Ok(SelectOutcome::Added(value))
    } else {
        Ok(SelectOutcome::Picked(choice))
    }
}

/// Fixed action menu: returns the zero-based index of the chosen item. No
/// retry loop, the action set is never empty and a choice cannot be invalid.
pub fn choose_action(actions: &[ActionItem]) -> Result<usize, UiError> {
    let names: Vec<&str> = actions.iter().map(|a| a.name.as_str()).collect();
    Ok(Select::new()
        .with_prompt("Action")
        .items(&names)
        .default(0)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    fn seed(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    /// Round double: pops scripted outcomes and records every option list it
    /// was shown.
    struct Script {
        outcomes: RefCell<VecDeque<Result<SelectOutcome, UiError>>>,
        shown: RefCell<Vec<Vec<String>>>,
    }

    impl Script {
        fn new(outcomes: Vec<Result<SelectOutcome, UiError>>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.into()),
                shown: RefCell::new(Vec::new()),
            }
        }

        fn round(&self, options: &[String]) -> Result<SelectOutcome, UiError> {
            self.shown.borrow_mut().push(options.to_vec());
            self.outcomes
                .borrow_mut()
                .pop_front()
                .expect("round called more times than scripted")
        }
    }

    #[test]
    fn picking_an_existing_option_returns_it() {
        let script = Script::new(vec![Ok(SelectOutcome::Picked(1))]);
        let result = run_select_with_add(&seed(&["en", "zh", "ja"]), |o| script.round(o)).unwrap();
        assert_eq!(result, "zh");
        assert_eq!(script.shown.borrow().len(), 1);
        assert_eq!(script.shown.borrow()[0], seed(&["en", "zh", "ja"]));
    }

    #[test]
    fn added_value_appears_in_next_round_and_needs_reselection() {
        let script = Script::new(vec![
            Ok(SelectOutcome::Added("ko".to_string())),
            Ok(SelectOutcome::Picked(3)),
        ]);
        let result = run_select_with_add(&seed(&["en", "zh", "ja"]), |o| script.round(o)).unwrap();
        assert_eq!(result, "ko");
        let shown = script.shown.borrow();
        assert_eq!(shown[0], seed(&["en", "zh", "ja"]));
        assert_eq!(shown[1], seed(&["en", "zh", "ja", "ko"]));
    }

    #[test]
    fn repeated_additions_accumulate() {
        let script = Script::new(vec![
            Ok(SelectOutcome::Added("fr".to_string())),
            Ok(SelectOutcome::Added("de".to_string())),
            Ok(SelectOutcome::Picked(2)),
        ]);
        let result = run_select_with_add(&seed(&["zh-TW"]), |o| script.round(o)).unwrap();
        assert_eq!(result, "de");
        assert_eq!(
            script.shown.borrow().last().unwrap(),
            &seed(&["zh-TW", "fr", "de"])
        );
    }

    #[test]
    fn round_error_propagates_out_of_the_loop() {
        let script = Script::new(vec![Err(UiError::Aborted)]);
        let err = run_select_with_add(&seed(&["en"]), |o| script.round(o)).unwrap_err();
        assert!(matches!(err, UiError::Aborted));
    }
}
