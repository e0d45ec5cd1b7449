// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use numera::format::format_indian;
use numera::report::{self, ResultCard};
use numera::{
    evaluate_expression, AngleMode, Conversion, CurrencyRequest, EmiRequest, ExchangeRateTable,
    SavingsRequest, Settings, SipRequest, TaxRequest, ZakatRequest,
};

#[derive(Parser)]
#[command(name = "numera", version, about = "Finance calculators and a scientific calculator")]
struct Cli {
    /// Print results as JSON instead of a result card
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Ui,
    /// Loan EMI
    Emi {
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        /// Annual interest rate in percent
        #[arg(long, allow_hyphen_values = true)]
        rate: String,
        #[arg(long, allow_hyphen_values = true)]
        years: String,
    },
    /// Systematic investment plan
    Sip {
        #[arg(long, allow_hyphen_values = true)]
        monthly: String,
        /// Expected annual return in percent
        #[arg(long, allow_hyphen_values = true)]
        rate: String,
        #[arg(long, allow_hyphen_values = true)]
        years: String,
    },
    /// Indian income tax, old or new regime
    Tax {
        #[arg(long, allow_hyphen_values = true)]
        income: String,
        #[arg(long, default_value = "new")]
        regime: String,
        /// Old regime only
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        deductions: String,
    },
    /// Convert between supported currencies
    Currency {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        from: String,
        to: String,
        /// Try the live rate service first (needs the live-rates feature)
        #[arg(long)]
        live: bool,
    },
    /// Zakat on net zakatable wealth
    Zakat {
        #[arg(long, default_value = "")]
        cash: String,
        #[arg(long, default_value = "")]
        gold: String,
        #[arg(long, default_value = "")]
        silver: String,
        #[arg(long, default_value = "")]
        investments: String,
        #[arg(long, default_value = "")]
        debts: String,
    },
    /// Months needed to reach a savings goal
    Savings {
        #[arg(long, allow_hyphen_values = true)]
        goal: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        current: String,
        #[arg(long, allow_hyphen_values = true)]
        monthly: String,
        /// Annual interest in percent
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        interest: String,
    },
    /// Evaluate a scientific expression, e.g. `numera calc "sin(30)+2^3"`
    Calc {
        #[arg(required = true, allow_hyphen_values = true, trailing_var_arg = true)]
        expression: Vec<String>,
        /// Trig functions use radians instead of degrees
        #[arg(long)]
        radians: bool,
    },
    /// Show the built-in exchange-rate table
    Rates {
        /// Only rates from this currency
        #[arg(long)]
        from: Option<String>,
    },
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    expression: &'a str,
    result: String,
    angle_mode: AngleMode,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => run_ui_mode(),
        command => {
            init_tracing();
            run_command(command, cli.json)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(command: Command, json: bool) -> Result<()> {
    match command {
        Command::Ui => run_ui_mode(),
        Command::Emi { amount, rate, years } => {
            let result = EmiRequest::from_raw(&amount, &rate, &years).calculate()?;
            emit(json, &result, report::emi_card(&result))
        }
        Command::Sip { monthly, rate, years } => {
            let result = SipRequest::from_raw(&monthly, &rate, &years).calculate()?;
            emit(json, &result, report::sip_card(&result))
        }
        Command::Tax { income, regime, deductions } => {
            let result = TaxRequest::from_raw(&income, &regime, &deductions).calculate()?;
            emit(json, &result, report::tax_card(&result))
        }
        Command::Currency { amount, from, to, live } => {
            let mut request = CurrencyRequest::from_raw(&amount, &from, &to);
            request.live = live;
            let conversion = convert(&request)?;
            emit(json, &conversion, report::currency_card(&conversion))
        }
        Command::Zakat { cash, gold, silver, investments, debts } => {
            let result =
                ZakatRequest::from_raw(&cash, &gold, &silver, &investments, &debts).calculate()?;
            emit(json, &result, report::zakat_card(&result))
        }
        Command::Savings { goal, current, monthly, interest } => {
            let outcome = SavingsRequest::from_raw(&goal, &current, &monthly, &interest).calculate()?;
            emit(json, &outcome, report::savings_card(&outcome))
        }
        Command::Calc { expression, radians } => {
            let expression = expression.join(" ");
            let angle_mode = if radians { AngleMode::Radians } else { AngleMode::Degrees };
            let result = evaluate_expression(&expression, angle_mode)?;

            if json {
                let output = CalcOutput { expression: &expression, result, angle_mode };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{} =", expression);
                println!("{}", result);
            }
            Ok(())
        }
        Command::Rates { from } => print_rates(from.as_deref(), json),
    }
}

/// Print either the JSON record or the plain-text result card
fn emit<T: Serialize>(json: bool, data: &T, card: ResultCard) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        println!("{}", card);
    }
    Ok(())
}

fn convert(request: &CurrencyRequest) -> Result<Conversion> {
    if !request.live {
        return Ok(request.calculate()?);
    }
    convert_live(request)
}

#[cfg(feature = "live-rates")]
fn convert_live(request: &CurrencyRequest) -> Result<Conversion> {
    use anyhow::Context;
    use numera::live_rates::LiveRateClient;

    request.validate()?;
    let settings = Settings::load()?;
    let client = LiveRateClient::from_settings(&settings)?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let quote = runtime.block_on(client.quote(&request.from, &request.to))?;
    Ok(request.calculate_with(quote)?)
}

#[cfg(not(feature = "live-rates"))]
fn convert_live(_request: &CurrencyRequest) -> Result<Conversion> {
    anyhow::bail!("Live rates not available! Rebuild with: cargo build --features live-rates")
}

fn print_rates(from: Option<&str>, json: bool) -> Result<()> {
    let table = ExchangeRateTable::fallback();
    let from = from.map(|code| code.trim().to_ascii_uppercase());

    if let Some(code) = &from {
        if !table.contains(code) {
            anyhow::bail!("Unsupported currency: {}", code);
        }
    }

    if json {
        match &from {
            Some(code) => println!("{}", serde_json::to_string_pretty(&table.targets(code))?),
            None => println!("{}", serde_json::to_string_pretty(table)?),
        }
        return Ok(());
    }

    println!("💱 Approximate Exchange Rates");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for base in table.currencies() {
        if from.as_deref().map_or(false, |code| code != base) {
            continue;
        }
        if let Some(targets) = table.targets(base) {
            for (to, rate) in targets {
                println!("1 {} ≈ {:>12} {}", base, format_indian(*rate, 4), to);
            }
        }
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    // Settings problems should never keep the calculators from opening
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("⚠️  Ignoring settings: {:#}", e);
        Settings::default()
    });

    let mut app = ui::App::new(settings);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use a subcommand: numera emi --amount 1000000 --rate 10 --years 20");
    std::process::exit(1);
}
