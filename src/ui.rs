use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use numera::calculator::{CalculatorState, Status};
use numera::expression::Constant;
use numera::formulas::currency::SUPPORTED_CURRENCIES;
use numera::report::{self, ResultCard};
use numera::{
    CalcError, CurrencyRequest, EmiRequest, SavingsRequest, Settings, SipRequest, TaxRequest,
    Theme, ZakatRequest,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;

// ============================================================================
// TOOLS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Emi,
    Sip,
    Tax,
    Currency,
    Zakat,
    Savings,
    Scientific,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Emi,
        Tool::Sip,
        Tool::Tax,
        Tool::Currency,
        Tool::Zakat,
        Tool::Savings,
        Tool::Scientific,
    ];

    pub fn title(&self) -> &str {
        match self {
            Tool::Emi => "EMI Calculator",
            Tool::Sip => "SIP Calculator",
            Tool::Tax => "Income Tax Calculator",
            Tool::Currency => "Currency Converter",
            Tool::Zakat => "Zakat Calculator",
            Tool::Savings => "Savings Goal Planner",
            Tool::Scientific => "Scientific Calculator",
        }
    }

    pub fn icon(&self) -> &str {
        match self {
            Tool::Emi => "🏠",
            Tool::Sip => "📈",
            Tool::Tax => "🧾",
            Tool::Currency => "💱",
            Tool::Zakat => "🌙",
            Tool::Savings => "🎯",
            Tool::Scientific => "🧮",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Tool::Emi => "Monthly installment, total interest and payment for a loan",
            Tool::Sip => "Maturity value of a monthly investment plan",
            Tool::Tax => "Indian income tax under the old or new regime",
            Tool::Currency => "Convert between USD, INR, EUR, GBP, JPY, AUD and CAD",
            Tool::Zakat => "Zakat due on net zakatable wealth",
            Tool::Savings => "Months needed to reach a savings goal",
            Tool::Scientific => "Trig, logs, powers, factorial, memory and history",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Tool(Tool),
}

// ============================================================================
// FORMS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    /// Cycled with Left/Right
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
    pub text: String,
    pub choice: usize,
}

impl Field {
    fn text(label: &'static str, initial: &str) -> Self {
        Field {
            label,
            kind: FieldKind::Text,
            text: initial.to_string(),
            choice: 0,
        }
    }

    fn choice(label: &'static str, options: &'static [&'static str], selected: usize) -> Self {
        Field {
            label,
            kind: FieldKind::Choice(options),
            text: String::new(),
            choice: selected,
        }
    }

    pub fn value(&self) -> &str {
        match &self.kind {
            FieldKind::Text => &self.text,
            FieldKind::Choice(options) => options.get(self.choice).copied().unwrap_or(""),
        }
    }
}

const REGIMES: &[&str] = &["new", "old"];

/// One finance calculator: input fields plus the last result or error
#[derive(Debug, Clone)]
pub struct Form {
    pub tool: Tool,
    pub fields: Vec<Field>,
    pub focus: usize,
    pub result: Option<ResultCard>,
    pub error: Option<String>,
}

impl Form {
    /// Fields for a finance tool; the scientific calculator has no form
    pub fn for_tool(tool: Tool) -> Option<Form> {
        let fields = match tool {
            Tool::Emi => vec![
                Field::text("Loan Amount (₹)", ""),
                Field::text("Interest Rate (% p.a.)", ""),
                Field::text("Tenure (years)", ""),
            ],
            Tool::Sip => vec![
                Field::text("Monthly Investment (₹)", ""),
                Field::text("Expected Return (% p.a.)", ""),
                Field::text("Investment Period (years)", ""),
            ],
            Tool::Tax => vec![
                Field::text("Annual Income (₹)", ""),
                Field::choice("Tax Regime", REGIMES, 0),
                Field::text("Deductions (₹, old regime)", ""),
            ],
            Tool::Currency => vec![
                Field::text("Amount", ""),
                Field::choice("From", SUPPORTED_CURRENCIES, 0),
                Field::choice("To", SUPPORTED_CURRENCIES, 1),
            ],
            Tool::Zakat => vec![
                Field::text("Cash & Savings (₹)", ""),
                Field::text("Gold Value (₹)", ""),
                Field::text("Silver Value (₹)", ""),
                Field::text("Investments (₹)", ""),
                Field::text("Debts (₹)", ""),
            ],
            Tool::Savings => vec![
                Field::text("Goal Amount (₹)", ""),
                Field::text("Current Savings (₹)", ""),
                Field::text("Monthly Savings (₹)", ""),
                Field::text("Interest Rate (% p.a.)", ""),
            ],
            Tool::Scientific => return None,
        };

        Some(Form {
            tool,
            fields,
            focus: 0,
            result: None,
            error: None,
        })
    }

    fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(Field::value).unwrap_or("")
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = if self.focus == 0 {
            self.fields.len() - 1
        } else {
            self.focus - 1
        };
    }

    pub fn focused(&self) -> Option<&Field> {
        self.fields.get(self.focus)
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.kind == FieldKind::Text {
                field.text.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.text.pop();
        }
    }

    /// Move a choice field by `step` options, wrapping around
    pub fn cycle(&mut self, step: isize) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if let FieldKind::Choice(options) = field.kind {
                let len = options.len() as isize;
                field.choice = (field.choice as isize + step).rem_euclid(len) as usize;
            }
        }
    }

    /// Validate and run the calculator; the outcome replaces any previous one
    pub fn calculate(&mut self) {
        let outcome: Result<ResultCard, CalcError> = match self.tool {
            Tool::Emi => EmiRequest::from_raw(self.value(0), self.value(1), self.value(2))
                .calculate()
                .map(|r| report::emi_card(&r)),
            Tool::Sip => SipRequest::from_raw(self.value(0), self.value(1), self.value(2))
                .calculate()
                .map(|r| report::sip_card(&r)),
            Tool::Tax => TaxRequest::from_raw(self.value(0), self.value(1), self.value(2))
                .calculate()
                .map(|r| report::tax_card(&r)),
            Tool::Currency => CurrencyRequest::from_raw(self.value(0), self.value(1), self.value(2))
                .calculate()
                .map(|c| report::currency_card(&c)),
            Tool::Zakat => ZakatRequest::from_raw(
                self.value(0),
                self.value(1),
                self.value(2),
                self.value(3),
                self.value(4),
            )
            .calculate()
            .map(|r| report::zakat_card(&r)),
            Tool::Savings => SavingsRequest::from_raw(
                self.value(0),
                self.value(1),
                self.value(2),
                self.value(3),
            )
            .calculate()
            .map(|o| report::savings_card(&o)),
            Tool::Scientific => return,
        };

        match outcome {
            Ok(card) => {
                self.result = Some(card);
                self.error = None;
            }
            Err(err) => {
                self.result = None;
                self.error = Some(err.to_string());
            }
        }
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct App {
    pub settings: Settings,
    /// Where theme changes are persisted; `None` keeps them in memory only
    pub settings_path: Option<PathBuf>,
    pub page: Page,
    pub home_state: TableState,
    pub form: Option<Form>,
    pub calculator: CalculatorState,
    pub message: Option<String>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let mut app = Self::in_memory(settings);
        app.settings_path = Settings::default_path();
        app
    }

    pub fn in_memory(settings: Settings) -> Self {
        let mut home_state = TableState::default();
        home_state.select(Some(0));

        Self {
            settings,
            settings_path: None,
            page: Page::Home,
            home_state,
            form: None,
            calculator: CalculatorState::new(),
            message: None,
        }
    }

    pub fn selected_tool(&self) -> Tool {
        let i = self.home_state.selected().unwrap_or(0);
        Tool::ALL[i.min(Tool::ALL.len() - 1)]
    }

    pub fn open(&mut self, tool: Tool) {
        self.page = Page::Tool(tool);
        self.form = Form::for_tool(tool);
        self.message = None;
    }

    /// Back to the tool list; results are discarded with the form
    pub fn close(&mut self) {
        self.page = Page::Home;
        self.form = None;
        self.message = None;
    }

    pub fn next(&mut self) {
        let i = (self.home_state.selected().unwrap_or(0) + 1) % Tool::ALL.len();
        self.home_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.home_state.selected() {
            Some(0) | None => Tool::ALL.len() - 1,
            Some(i) => i - 1,
        };
        self.home_state.select(Some(i));
    }

    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggled();
        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save_to(path) {
                self.message = Some(format!("Theme not saved: {:#}", e));
            }
        }
    }

    /// Handle one key press; returns true when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.page {
            Page::Home => return self.handle_home_key(key),
            Page::Tool(Tool::Scientific) => self.handle_calculator_key(key),
            Page::Tool(_) => self.handle_form_key(key),
        }
        false
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Enter => self.open(self.selected_tool()),
            KeyCode::Char(c @ '1'..='7') => {
                let i = c as usize - '1' as usize;
                self.home_state.select(Some(i));
                self.open(Tool::ALL[i]);
            }
            _ => {}
        }
        false
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            self.close();
            return;
        };

        match key.code {
            KeyCode::Esc => self.close(),
            KeyCode::Enter => form.calculate(),
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Left => form.cycle(-1),
            KeyCode::Right => form.cycle(1),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.type_char(c),
            _ => {}
        }
    }

    fn handle_calculator_key(&mut self, key: KeyEvent) {
        self.message = None;
        let calc = &mut self.calculator;

        match key.code {
            KeyCode::Esc => self.close(),
            KeyCode::Enter | KeyCode::Char('=') => {
                if let Err(CalcError::IncompleteExpression) = calc.evaluate() {
                    self.message = Some("Expression is incomplete".to_string());
                }
            }
            KeyCode::Backspace => calc.delete_last(),
            KeyCode::Delete => calc.clear_entry(),
            KeyCode::Char(c) => match c {
                '0'..='9' | '.' | '(' | ')' => calc.input_digit(c),
                '+' | '-' | '*' | '/' | '^' | '%' => calc.input_operator(c),
                ',' => calc.input_separator(),
                's' => calc.input_function("sin"),
                'o' => calc.input_function("cos"),
                'a' => calc.input_function("tan"),
                'S' => calc.input_function("asin"),
                'O' => calc.input_function("acos"),
                'A' => calc.input_function("atan"),
                'l' => calc.input_function("log"),
                'n' => calc.input_function("ln"),
                'r' => calc.input_function("sqrt"),
                'b' => calc.input_function("abs"),
                'w' => calc.input_function("pow"),
                '!' => calc.input_function("factorial"),
                'p' => calc.input_constant(Constant::Pi),
                'e' => calc.input_constant(Constant::E),
                'd' => calc.toggle_angle_mode(),
                'm' => calc.memory_store(),
                'M' => calc.memory_recall(),
                'x' => calc.memory_clear(),
                'c' => calc.clear(),
                't' => self.toggle_theme(),
                _ => {}
            },
            _ => {}
        }
    }
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Colors for one theme
struct Palette {
    text: Color,
    muted: Color,
    accent: Color,
    border: Color,
    highlight_bg: Color,
    error: Color,
    success: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            text: Color::White,
            muted: Color::Gray,
            accent: Color::Yellow,
            border: Color::Cyan,
            highlight_bg: Color::DarkGray,
            error: Color::Red,
            success: Color::Green,
        },
        Theme::Dark => Palette {
            text: Color::Gray,
            muted: Color::DarkGray,
            accent: Color::Magenta,
            border: Color::Blue,
            highlight_bg: Color::Black,
            error: Color::LightRed,
            success: Color::LightGreen,
        },
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let colors = palette(app.settings.theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app, &colors);

    match app.page {
        Page::Home => render_home(f, chunks[1], app, &colors),
        Page::Tool(Tool::Scientific) => render_calculator(f, chunks[1], app, &colors),
        Page::Tool(_) => {
            if let Some(form) = &app.form {
                render_form(f, chunks[1], form, &colors);
            }
        }
    }

    render_status_bar(f, chunks[2], app, &colors);
}

fn render_header(f: &mut Frame, area: Rect, app: &App, colors: &Palette) {
    let page_title = match app.page {
        Page::Home => "Tools".to_string(),
        Page::Tool(tool) => format!("{} {}", tool.icon(), tool.title()),
    };

    let spans = vec![
        Span::styled(
            "🧮 Numera",
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  "),
        Span::styled(page_title, Style::default().fg(colors.text)),
        Span::raw("  │  "),
        Span::styled(
            format!("Theme: {}", app.settings.theme),
            Style::default().fg(colors.muted),
        ),
    ];

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border)),
    );

    f.render_widget(header, area);
}

fn render_home(f: &mut Frame, area: Rect, app: &mut App, colors: &Palette) {
    let header_cells = ["#", "Tool", "What it does"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(colors.accent).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells).height(1);

    let rows = Tool::ALL.iter().enumerate().map(|(i, tool)| {
        Row::new(vec![
            Cell::from(format!("{}", i + 1)).style(Style::default().fg(colors.accent)),
            Cell::from(format!("{} {}", tool.icon(), tool.title())),
            Cell::from(tool.description()).style(Style::default().fg(colors.muted)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(28),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.text))
            .title(" Calculators "),
    )
    .highlight_style(
        Style::default()
            .bg(colors.highlight_bg)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.home_state);
}

fn render_form(f: &mut Frame, area: Rect, form: &Form, colors: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let mut lines = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.muted)
        };

        let value = match field.kind {
            FieldKind::Text if focused => format!("{}▏", field.text),
            FieldKind::Text => field.text.clone(),
            FieldKind::Choice(_) => format!("◀ {} ▶", field.value().to_uppercase()),
        };

        lines.push(Line::from(Span::styled(field.label, label_style)));
        lines.push(Line::from(vec![
            Span::raw(if focused { "→ " } else { "  " }),
            Span::styled(value, Style::default().fg(colors.text)),
        ]));
        lines.push(Line::from(""));
    }

    let inputs = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .title(format!(" {} ", form.tool.title())),
    );
    f.render_widget(inputs, chunks[0]);

    match (&form.result, &form.error) {
        (_, Some(error)) => {
            let message = Paragraph::new(vec![Line::from(Span::styled(
                format!("❌ {}", error),
                Style::default().fg(colors.error).add_modifier(Modifier::BOLD),
            ))])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.error))
                    .title(" Error "),
            );
            f.render_widget(message, chunks[1]);
        }
        (Some(card), None) => render_result_card(f, chunks[1], card, colors),
        (None, None) => {
            let hint = Paragraph::new("Fill in the fields and press Enter to calculate.")
                .style(Style::default().fg(colors.muted))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Results "));
            f.render_widget(hint, chunks[1]);
        }
    }
}

fn render_result_card(f: &mut Frame, area: Rect, card: &ResultCard, colors: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.success))
        .title(format!(" {} ", card.title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let gauge_height = if card.progress.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(card.rows.len() as u16 + 1),
            Constraint::Length(gauge_height),
            Constraint::Min(0),
        ])
        .split(inner);

    let rows = card.rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.label.clone()).style(Style::default().fg(colors.muted)),
            Cell::from(row.value.clone()).style(Style::default().fg(colors.text)),
        ])
    });
    let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)]);
    f.render_widget(table, chunks[0]);

    if let Some(ratio) = card.progress {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Progress "))
            .gauge_style(Style::default().fg(colors.success))
            .ratio(ratio.clamp(0.0, 1.0));
        f.render_widget(gauge, chunks[1]);
    }

    let mut lines = vec![Line::from(Span::styled(
        card.highlight.clone(),
        Style::default().fg(colors.success).add_modifier(Modifier::BOLD),
    ))];
    if let Some(note) = &card.note {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            note.clone(),
            Style::default().fg(colors.muted).add_modifier(Modifier::ITALIC),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[2]);
}

fn render_calculator(f: &mut Frame, area: Rect, app: &App, colors: &Palette) {
    let calc = &app.calculator;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(columns[0]);

    // Display: echo line, then the buffer
    let display_style = match calc.status() {
        Status::Error => Style::default().fg(colors.error).add_modifier(Modifier::BOLD),
        Status::Evaluated => Style::default().fg(colors.success).add_modifier(Modifier::BOLD),
        Status::Editing => Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
    };
    let indicators = format!(
        " {}{} ",
        calc.angle_mode().label(),
        if calc.has_memory() { "  M" } else { "" }
    );
    let display = Paragraph::new(vec![
        Line::from(Span::styled(calc.echo().to_string(), Style::default().fg(colors.muted))),
        Line::from(""),
        Line::from(Span::styled(calc.display().to_string(), display_style)),
    ])
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .title(indicators),
    );
    f.render_widget(display, left[0]);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(colors.accent));
    let text = |t: &'static str| Span::styled(t, Style::default().fg(colors.muted));
    let keypad = Paragraph::new(vec![
        Line::from(vec![key("0-9 . ( )"), text("  digits      "), key("+ - * / ^ %"), text("  operators")]),
        Line::from(vec![key("s o a"), text("  sin cos tan   "), key("S O A"), text("  asin acos atan")]),
        Line::from(vec![key("l n"), text("  log ln   "), key("r"), text(" sqrt  "), key("b"), text(" abs  "), key("!"), text(" factorial")]),
        Line::from(vec![key("w"), text(" pow(a,b)  "), key(","), text(" separator  "), key("p"), text(" π  "), key("e"), text(" e")]),
        Line::from(vec![key("d"), text(" DEG/RAD   "), key("m M x"), text("  memory store/recall/clear")]),
        Line::from(vec![key("Enter ="), text(" evaluate  "), key("c"), text(" clear  "), key("Del"), text(" clear entry  "), key("⌫"), text(" delete")]),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Keys "));
    f.render_widget(keypad, left[1]);

    let items: Vec<ListItem> = calc
        .history()
        .iter()
        .rev()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(Span::styled(entry.expression.clone(), Style::default().fg(colors.muted))),
                Line::from(Span::styled(
                    format!("= {}", entry.result),
                    Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
                )),
            ])
        })
        .collect();
    let history = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .title(" History "),
    );
    f.render_widget(history, columns[1]);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, colors: &Palette) {
    let mut spans = Vec::new();

    if let Some(message) = &app.message {
        spans.push(Span::styled(format!("⚠ {}", message), Style::default().fg(colors.error)));
        spans.push(Span::raw("  |  "));
    }

    let hints: &[(&str, &str)] = match app.page {
        Page::Home => &[("1-7", "Open"), ("↑/↓", "Select"), ("Enter", "Open"), ("t", "Theme")],
        Page::Tool(Tool::Scientific) => &[("Enter", "Evaluate"), ("d", "DEG/RAD"), ("t", "Theme"), ("Esc", "Back")],
        Page::Tool(_) => &[("Tab/↑/↓", "Field"), ("←/→", "Choice"), ("Enter", "Calculate"), ("Esc", "Close")],
    };

    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(colors.accent)));
        spans.push(Span::raw(format!(" {}", action)));
    }

    if app.page == Page::Home {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("q", Style::default().fg(colors.error)));
        spans.push(Span::raw(" Quit"));
    }

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.text)),
    );

    f.render_widget(status, area);
}
