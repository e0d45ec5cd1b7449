// 📋 Result Cards - labelled rows + highlight line for every calculator
// Shared by the TUI, the CLI and the API so all shells say the same thing

use crate::formulas::{
    Conversion, EmiResult, SavingsOutcome, SipResult, TaxResult, ZakatResult,
};
use crate::format::{format_currency, format_indian, format_number, js_number};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    pub title: String,
    pub rows: Vec<ResultRow>,
    pub highlight: String,
    /// Small print under the highlight
    pub note: Option<String>,
    /// Fill fraction for a progress bar (savings goal only)
    pub progress: Option<f64>,
}

impl ResultCard {
    fn new(title: impl Into<String>) -> Self {
        ResultCard {
            title: title.into(),
            rows: Vec::new(),
            highlight: String::new(),
            note: None,
            progress: None,
        }
    }

    fn row(mut self, label: &str, value: impl Into<String>) -> Self {
        self.rows.push(ResultRow {
            label: label.to_string(),
            value: value.into(),
        });
        self
    }

    fn highlight(mut self, text: impl Into<String>) -> Self {
        self.highlight = text.into();
        self
    }

    fn note(mut self, text: &str) -> Self {
        self.note = Some(text.to_string());
        self
    }

    /// Value for a row label, mostly for tests and API consumers
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "━".repeat(self.title.chars().count().max(24)))?;

        let width = self.rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
        for row in &self.rows {
            writeln!(f, "{:<width$}  {}", row.label, row.value, width = width)?;
        }

        writeln!(f)?;
        write!(f, "{}", self.highlight)?;
        if let Some(note) = &self.note {
            write!(f, "\n{}", note)?;
        }
        Ok(())
    }
}

// ============================================================================
// CARD BUILDERS
// ============================================================================

pub fn emi_card(result: &EmiResult) -> ResultCard {
    ResultCard::new("EMI Calculation Results")
        .row("Monthly EMI", format_currency(result.emi))
        .row("Principal Amount", format_currency(result.principal))
        .row("Total Interest", format_currency(result.total_interest))
        .row("Total Payment", format_currency(result.total_payment))
        .highlight(format!("Your monthly EMI is {}", format_currency(result.emi)))
}

pub fn sip_card(result: &SipResult) -> ResultCard {
    ResultCard::new("SIP Calculation Results")
        .row("Monthly Investment", format_currency(result.monthly_investment))
        .row("Total Investment", format_currency(result.total_investment))
        .row("Total Returns", format_currency(result.total_returns))
        .row("Maturity Value", format_currency(result.future_value))
        .highlight(format!(
            "Your investment will grow to {} in {} years!",
            format_currency(result.future_value),
            js_number(result.years)
        ))
}

pub fn tax_card(result: &TaxResult) -> ResultCard {
    ResultCard::new(format!(
        "Income Tax Calculation Results ({} Regime)",
        result.regime.name()
    ))
    .row("Annual Income", format_currency(result.annual_income))
    .row("Taxable Income", format_currency(result.taxable_income))
    .row("Income Tax", format_currency(result.tax))
    .row("Health & Education Cess", format_currency(result.cess))
    .row("Total Tax Liability", format_currency(result.total_tax))
    .row("Net Income", format_currency(result.net_income))
    .highlight(format!(
        "Your total tax liability is {}",
        format_currency(result.total_tax)
    ))
}

pub fn currency_card(conversion: &Conversion) -> ResultCard {
    let quote = &conversion.quote;
    let note = if quote.is_approximate() {
        "*Exchange rates are approximate and updated regularly"
    } else {
        "*Exchange rates are approximate and may vary"
    };

    let amount = format!("{} {}", format_number(conversion.amount), quote.from);
    let converted = format!("{} {}", format_number(conversion.converted), quote.to);

    let mut card = ResultCard::new("Currency Conversion Results")
        .row("Amount", amount.clone())
        .row(
            "Exchange Rate",
            format!("1 {} = {} {}", quote.from, format_indian(quote.rate, 4), quote.to),
        )
        .row("Converted Amount", converted.clone())
        .highlight(format!("{} = {}", amount, converted))
        .note(note);

    if let Some(as_of) = quote.as_of {
        card = card.row("Rates As Of", as_of.format("%Y-%m-%d %H:%M UTC").to_string());
    }
    card
}

pub fn zakat_card(result: &ZakatResult) -> ResultCard {
    let highlight = if result.eligible {
        format!("Your Zakat obligation is {}", format_currency(result.due))
    } else {
        "Your wealth is below Nisab threshold. No Zakat is due.".to_string()
    };

    ResultCard::new("Zakat Calculation Results")
        .row("Cash & Savings", format_currency(result.cash))
        .row("Gold Value", format_currency(result.gold))
        .row("Silver Value", format_currency(result.silver))
        .row("Investments", format_currency(result.investments))
        .row("Debts (Deducted)", format!("-{}", format_currency(result.debts)))
        .row("Net Zakatable Wealth", format_currency(result.net_wealth))
        .row("Nisab Threshold", format_currency(result.nisab))
        .row("Zakat Due", format_currency(result.due))
        .highlight(highlight)
        .note("*Consult with Islamic scholars for specific Zakat rulings")
}

pub fn savings_card(outcome: &SavingsOutcome) -> ResultCard {
    let plan = match outcome {
        SavingsOutcome::AlreadyMet => {
            return ResultCard::new("Savings Goal Analysis")
                .highlight("Congratulations! You've already reached your goal!");
        }
        SavingsOutcome::Plan(plan) => plan,
    };

    let (time, highlight) = match plan.months_to_goal() {
        Some(months) => (
            format!("{} months ({} years)", months, format_indian(plan.years, 1)),
            format!("You'll reach your goal in {} months!", months),
        ),
        None => (
            "Not reachable".to_string(),
            "This goal can't be reached at the current savings rate.".to_string(),
        ),
    };
    let mut card = ResultCard::new("Savings Goal Analysis")
        .row("Goal Amount", format_currency(plan.goal))
        .row("Current Savings", format_currency(plan.current))
        .row("Remaining Amount", format_currency(plan.remaining))
        .row("Monthly Savings", format_currency(plan.monthly_saving))
        .row("Time to Reach Goal", time)
        .row("Progress", format!("{}%", format_indian(plan.progress_pct, 1)))
        .highlight(highlight);
    card.progress = Some(plan.progress_ratio());
    card
}
