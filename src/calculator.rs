// 🔬 Scientific Calculator State - keypad buffer, memory register, history
// Editing -> Evaluated -> Editing, with Error recoverable by clearing or typing

use crate::error::CalcError;
use crate::expression::{evaluate_expression, AngleMode, Constant};
use crate::format::js_number;
use crate::validator::parse_float;
use serde::{Deserialize, Serialize};

/// Text shown on the display after a failed evaluation
pub const ERROR_DISPLAY: &str = "Error";

const OPERATORS: &[char] = &['+', '-', '*', '/', '^'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Buffer accepts input
    Editing,
    /// Buffer holds the last result; the next digit starts a new expression
    Evaluated,
    /// Last evaluation failed; buffer shows `Error`
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    buffer: String,
    /// The `expression =` line above the display
    echo: String,
    status: Status,
    angle_mode: AngleMode,
    memory: f64,
    has_memory: bool,
    history: Vec<HistoryEntry>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState {
            buffer: "0".to_string(),
            echo: String::new(),
            status: Status::Editing,
            angle_mode: AngleMode::Degrees,
            memory: 0.0,
            has_memory: false,
            history: Vec::new(),
        }
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_angle_mode(angle_mode: AngleMode) -> Self {
        CalculatorState {
            angle_mode,
            ..Self::default()
        }
    }

    // -- accessors ---------------------------------------------------------

    pub fn display(&self) -> &str {
        &self.buffer
    }

    pub fn echo(&self) -> &str {
        &self.echo
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Memory indicator: set by store, cleared by memory clear
    pub fn has_memory(&self) -> bool {
        self.has_memory
    }

    /// Most recent entry last
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    fn is_blank(&self) -> bool {
        self.buffer.is_empty() || self.buffer == "0"
    }

    /// Start a fresh buffer when the display holds a result or an error
    fn reset_if_finished(&mut self) {
        if self.status != Status::Editing {
            self.buffer.clear();
            self.status = Status::Editing;
        }
    }

    // -- input -------------------------------------------------------------

    /// Digits, `.`, `(` and `)`
    pub fn input_digit(&mut self, c: char) {
        self.reset_if_finished();

        if c == '(' {
            if self.is_blank() {
                self.buffer = "(".to_string();
            } else {
                self.buffer.push_str("*(");
            }
        } else if self.buffer == "0" && c != '.' {
            self.buffer = c.to_string();
        } else {
            self.buffer.push(c);
        }
    }

    /// `+ - * / ^ %`; a result stays on the display so it can be chained
    pub fn input_operator(&mut self, op: char) {
        match self.status {
            Status::Error => return,
            Status::Evaluated => self.status = Status::Editing,
            Status::Editing => {}
        }

        match op {
            '^' => self.buffer.push('^'),
            '%' => self.buffer.push_str("/100"),
            _ => {
                let ends_with_operator = self.buffer.ends_with(OPERATORS);
                if self.buffer.is_empty() || ends_with_operator {
                    return;
                }
                self.buffer.push(op);
            }
        }
    }

    /// Function name without the parenthesis, e.g. `"sin"`
    pub fn input_function(&mut self, name: &str) {
        self.reset_if_finished();
        self.insert_term(&format!("{}(", name));
    }

    pub fn input_constant(&mut self, constant: Constant) {
        self.reset_if_finished();
        self.insert_term(&js_number(constant.value()));
    }

    /// Argument separator for `pow(a, b)`
    pub fn input_separator(&mut self) {
        if self.status == Status::Editing {
            self.buffer.push(',');
        }
    }

    /// Replace a blank display, otherwise multiply onto what is there
    fn insert_term(&mut self, term: &str) {
        if self.is_blank() {
            self.buffer = term.to_string();
        } else {
            self.buffer.push('*');
            self.buffer.push_str(term);
        }
    }

    // -- evaluation --------------------------------------------------------

    /// Evaluate the buffer. An incomplete expression leaves everything untouched.
    pub fn evaluate(&mut self) -> Result<&str, CalcError> {
        let expression = self.buffer.clone();

        match evaluate_expression(&expression, self.angle_mode) {
            Ok(result) => {
                self.echo = format!("{} =", expression);
                self.buffer = result.clone();
                self.status = Status::Evaluated;
                self.history.push(HistoryEntry { expression, result });
                Ok(&self.buffer)
            }
            Err(CalcError::IncompleteExpression) => Err(CalcError::IncompleteExpression),
            Err(err) => {
                tracing::debug!(expression = %expression, error = %err, "evaluation failed");
                self.echo = ERROR_DISPLAY.to_string();
                self.buffer = ERROR_DISPLAY.to_string();
                self.status = Status::Error;
                Err(err)
            }
        }
    }

    // -- editing -----------------------------------------------------------

    pub fn clear(&mut self) {
        self.buffer = "0".to_string();
        self.echo.clear();
        self.status = Status::Editing;
    }

    pub fn clear_entry(&mut self) {
        self.buffer = "0".to_string();
        self.status = Status::Editing;
    }

    pub fn delete_last(&mut self) {
        if self.status == Status::Error {
            self.clear_entry();
            return;
        }
        if self.buffer.chars().count() > 1 {
            self.buffer.pop();
        } else {
            self.buffer = "0".to_string();
        }
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    pub fn toggle_angle_mode(&mut self) {
        self.angle_mode = self.angle_mode.toggled();
    }

    // -- memory ------------------------------------------------------------

    /// Store the display's numeric value, or 0 when it is not a number
    pub fn memory_store(&mut self) {
        self.memory = match parse_float(&self.buffer) {
            Some(v) if !v.is_nan() => v,
            _ => 0.0,
        };
        self.has_memory = true;
    }

    pub fn memory_recall(&mut self) {
        self.buffer = js_number(self.memory);
        self.status = Status::Evaluated;
    }

    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
        self.has_memory = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(state: &mut CalculatorState, keys: &str) {
        for c in keys.chars() {
            match c {
                '0'..='9' | '.' | '(' | ')' => state.input_digit(c),
                '+' | '-' | '*' | '/' | '^' | '%' => state.input_operator(c),
                ',' => state.input_separator(),
                _ => panic!("unsupported key {}", c),
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let state = CalculatorState::new();
        assert_eq!(state.display(), "0");
        assert_eq!(state.status(), Status::Editing);
        assert_eq!(state.angle_mode(), AngleMode::Degrees);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_leading_zero_replaced() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "7");
        assert_eq!(state.display(), "7");

        let mut state = CalculatorState::new();
        type_keys(&mut state, ".5");
        assert_eq!(state.display(), "0.5");
    }

    #[test]
    fn test_evaluate_records_history() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "2+2");
        assert_eq!(state.evaluate().unwrap(), "4");
        assert_eq!(state.status(), Status::Evaluated);
        assert_eq!(state.echo(), "2+2 =");
        assert_eq!(
            state.history(),
            &[HistoryEntry {
                expression: "2+2".to_string(),
                result: "4".to_string()
            }]
        );
    }

    #[test]
    fn test_digit_after_result_starts_fresh() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "2*3");
        state.evaluate().unwrap();
        type_keys(&mut state, "9");
        assert_eq!(state.display(), "9");
        assert_eq!(state.status(), Status::Editing);
    }

    #[test]
    fn test_operator_after_result_chains() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "2*3");
        state.evaluate().unwrap();
        type_keys(&mut state, "+4");
        assert_eq!(state.display(), "6+4");
        assert_eq!(state.evaluate().unwrap(), "10");
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_duplicate_operators_ignored() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "5+*-3");
        assert_eq!(state.display(), "5+3");
    }

    #[test]
    fn test_percent_and_power() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "50%");
        assert_eq!(state.display(), "50/100");
        assert_eq!(state.evaluate().unwrap(), "0.5");

        let mut state = CalculatorState::new();
        type_keys(&mut state, "2^10");
        assert_eq!(state.evaluate().unwrap(), "1024");
    }

    #[test]
    fn test_parenthesis_implies_multiplication() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "2(3+1)");
        assert_eq!(state.display(), "2*(3+1)");
        assert_eq!(state.evaluate().unwrap(), "8");
    }

    #[test]
    fn test_functions_and_constants() {
        let mut state = CalculatorState::new();
        state.input_function("sin");
        type_keys(&mut state, "30)");
        assert_eq!(state.display(), "sin(30)");
        assert_eq!(state.evaluate().unwrap(), "0.5");

        let mut state = CalculatorState::new();
        type_keys(&mut state, "2");
        state.input_constant(Constant::Pi);
        assert_eq!(state.display(), "2*3.141592653589793");

        let mut state = CalculatorState::new();
        state.input_function("pow");
        type_keys(&mut state, "2,8)");
        assert_eq!(state.evaluate().unwrap(), "256");
    }

    #[test]
    fn test_radian_mode_changes_trig() {
        let mut state = CalculatorState::with_angle_mode(AngleMode::Radians);
        state.input_function("cos");
        type_keys(&mut state, "0)");
        assert_eq!(state.evaluate().unwrap(), "1");
        state.toggle_angle_mode();
        assert_eq!(state.angle_mode(), AngleMode::Degrees);
    }

    #[test]
    fn test_error_state_and_recovery() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "1/0");
        assert_eq!(state.evaluate(), Err(CalcError::NonFiniteResult));
        assert_eq!(state.display(), ERROR_DISPLAY);
        assert_eq!(state.status(), Status::Error);
        assert!(state.history().is_empty());

        // Operators cannot extend an error
        type_keys(&mut state, "+");
        assert_eq!(state.display(), ERROR_DISPLAY);

        // A digit starts over
        type_keys(&mut state, "8");
        assert_eq!(state.display(), "8");
        assert_eq!(state.status(), Status::Editing);
    }

    #[test]
    fn test_incomplete_expression_leaves_state() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "4*");
        assert_eq!(state.evaluate(), Err(CalcError::IncompleteExpression));
        assert_eq!(state.display(), "4*");
        assert_eq!(state.status(), Status::Editing);
        assert!(state.echo().is_empty());
    }

    #[test]
    fn test_clear_and_delete() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "123");
        state.delete_last();
        assert_eq!(state.display(), "12");
        state.delete_last();
        state.delete_last();
        assert_eq!(state.display(), "0");

        type_keys(&mut state, "9+1");
        state.evaluate().unwrap();
        state.clear();
        assert_eq!(state.display(), "0");
        assert!(state.echo().is_empty());
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_memory_register() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "42");
        state.memory_store();
        assert!(state.has_memory());
        assert_eq!(state.memory(), 42.0);

        state.clear();
        state.memory_recall();
        assert_eq!(state.display(), "42");
        assert_eq!(state.status(), Status::Evaluated);

        // Recalled values are replaced by the next digit
        type_keys(&mut state, "1");
        assert_eq!(state.display(), "1");

        state.memory_clear();
        assert!(!state.has_memory());
        assert_eq!(state.memory(), 0.0);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_memory_store_of_non_number_is_zero() {
        let mut state = CalculatorState::new();
        type_keys(&mut state, "1/0");
        let _ = state.evaluate();
        state.memory_store();
        assert_eq!(state.memory(), 0.0);
    }
}
