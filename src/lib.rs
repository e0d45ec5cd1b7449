// Numera - Core Library
// Finance calculators + scientific expression evaluator, shared by the CLI, TUI and API server

pub mod error;
pub mod validator;
pub mod format;
pub mod formulas;       // EMI, SIP, tax, currency, zakat, savings goal
pub mod expression;     // tokenizer -> parser -> AST -> evaluator
pub mod calculator;     // scientific calculator state machine
pub mod requests;       // shell inputs validated before any formula runs
pub mod report;         // result cards shown by every shell
pub mod config;         // persisted settings + environment overrides

#[cfg(feature = "live-rates")]
pub mod live_rates;     // optional live exchange-rate collaborator

// Re-export commonly used types
pub use error::{CalcError, Result};
pub use validator::{parse_float, validate, FieldRange, ValidatedNumber};
pub use formulas::{
    compute_emi, compute_savings_goal, compute_sip, compute_tax, compute_zakat,
    convert_currency, Conversion, EmiResult, ExchangeRateTable, RateQuote, RateSource,
    SavingsOutcome, SavingsPlan, SipResult, TaxRegime, TaxResult, ZakatResult,
};
pub use expression::{evaluate_expression, format_result, AngleMode};
pub use calculator::{CalculatorState, HistoryEntry, Status};
pub use requests::{
    CurrencyRequest, EmiRequest, SavingsRequest, SipRequest, TaxRequest, ZakatRequest,
};
pub use report::{ResultCard, ResultRow};
pub use config::{Settings, Theme};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
