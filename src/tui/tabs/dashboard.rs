//! Dashboard tab: symbol input, analysis panels and the price chart.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
};

use crate::analysis::Analysis;
use crate::format::{format_change, format_currency, format_volume};
use crate::models::{Prediction, PredictionDirection, Sentiment, TradeSignal};
use crate::tui::app::{App, Focus, Mode};
use crate::tui::components::{panel, status_bar, tab_bar};

/// Renders the dashboard tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Length(3), // Symbol input
            Constraint::Length(7), // Price | Quick stats | Market overview
            Constraint::Min(10),   // Chart | Technical analysis
            Constraint::Length(6), // Trading signal | Predictions
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);
    render_input(frame, main_layout[2], app);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(main_layout[3]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_layout[4]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_layout[5]);

    match app.analysis {
        Some(ref analysis) => {
            render_price(frame, top[0], analysis);
            render_quick_stats(frame, top[1], analysis);
            render_market_overview(frame, top[2], analysis);
            render_chart(frame, middle[0], analysis);
            render_technical(frame, middle[1], analysis);
            render_trading_signal(frame, bottom[0], analysis);
            render_predictions(frame, bottom[1], analysis);
        }
        None => {
            let hint = "No analysis yet";
            for (area, title) in [
                (top[0], "Price"),
                (top[1], "Quick Stats"),
                (top[2], "Market Overview"),
                (middle[0], "Price Chart"),
                (middle[1], "Technical Analysis"),
                (bottom[0], "Trading Signal"),
                (bottom[1], "Predictions"),
            ] {
                panel::render_placeholder(frame, area, title, hint);
            }
        }
    }

    render_keybindings(frame, main_layout[6]);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.mode == Mode::Insert && app.focus == Focus::SymbolInput;
    let title = format!(
        "Symbol [{}] [{}]",
        app.asset_type.label(),
        app.timeframe.label()
    );
    let block = panel::block(&title, editing);

    let para = if app.symbol_input.as_str().is_empty() && !editing {
        Paragraph::new(app.asset_type.placeholder()).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.symbol_input.as_str())
    };

    let inner = block.inner(area);
    frame.render_widget(para.block(block), area);

    if editing {
        frame.set_cursor_position((inner.x + app.symbol_input.cursor_width(), inner.y));
    }
}

fn change_color(up: bool) -> Color {
    if up { Color::Green } else { Color::Red }
}

fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Bullish => Color::Green,
        Sentiment::Bearish => Color::Red,
        Sentiment::Neutral => Color::Yellow,
    }
}

fn label_value<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn render_price(frame: &mut Frame, area: Rect, analysis: &Analysis) {
    let price = &analysis.price;
    let color = change_color(price.is_up());
    let arrow = if price.is_up() { "▲" } else { "▼" };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", price.symbol),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(arrow, Style::default().fg(color)),
            Span::styled(
                format!(" {}", format_currency(price.current_price, false)),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format_change(price.price_change, price.percent_change),
            Style::default().fg(color),
        )),
        label_value("24h High: ", format_currency(price.high_24h, false)),
        label_value("24h Low:  ", format_currency(price.low_24h, false)),
        label_value("Volume:   ", format_volume(price.volume_24h)),
    ];

    panel::render_lines(frame, area, "Price", lines);
}

fn render_quick_stats(frame: &mut Frame, area: Rect, analysis: &Analysis) {
    let market = &analysis.market;
    let lines = vec![
        label_value("Market Cap: ", format_currency(market.market_cap, true)),
        label_value("Rank:       ", format!("#{}", market.rank)),
        label_value("Supply:     ", format_volume(market.supply)),
        label_value("Strength:   ", analysis.strength.label().to_string()),
        label_value("Risk:       ", analysis.risk.label().to_string()),
    ];

    panel::render_lines(frame, area, "Quick Stats", lines);
}

fn render_market_overview(frame: &mut Frame, area: Rect, analysis: &Analysis) {
    let overview = &analysis.overview;
    let lines = vec![
        label_value("Fear & Greed: ", format!("{:.0}", overview.fear_greed)),
        Line::from(Span::styled(
            overview.fear_greed_label.clone(),
            Style::default().fg(Color::Yellow),
        )),
        label_value("VIX:          ", format!("{:.2}", overview.vix)),
        label_value(
            "Updated:      ",
            analysis.generated_at.format("%H:%M:%S").to_string(),
        ),
    ];

    panel::render_lines(frame, area, "Market Overview", lines);
}

fn render_chart(frame: &mut Frame, area: Rect, analysis: &Analysis) {
    let series = &analysis.chart;
    let title = format!(
        "Price Chart {} [{}]",
        analysis.request.symbol,
        analysis.request.timeframe.label()
    );
    let block = panel::block(&title, false);

    let Some((low, high)) = series.bounds() else {
        panel::render_placeholder(frame, area, &title, "No chart data");
        return;
    };

    // Pad flat series so the line is not drawn on the border.
    let pad = ((high - low) * 0.05).max(high.abs() * 0.01).max(f64::EPSILON);
    let (y_min, y_max) = (low - pad, high + pad);
    let points = series.points();
    let x_max = points.len().saturating_sub(1) as f64;

    let x_labels: Vec<Span> = [series.labels.first(), series.labels.last()]
        .into_iter()
        .flatten()
        .map(|l| Span::raw(l.clone()))
        .collect();
    let y_labels = vec![
        Span::raw(format_currency(y_min, false)),
        Span::raw(format_currency((y_min + y_max) / 2.0, false)),
        Span::raw(format_currency(y_max, false)),
    ];

    let dataset = Dataset::default()
        .name(analysis.request.symbol.to_string())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(change_color(analysis.price.is_up())))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

fn render_technical(frame: &mut Frame, area: Rect, analysis: &Analysis) {
    let t = &analysis.technical;
    let indicator = |name: &'static str, value: String, signal: Sentiment| {
        Line::from(vec![
            Span::styled(name, Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{value:<12}")),
            Span::styled(signal.label(), Style::default().fg(sentiment_color(signal))),
        ])
    };

    let lines = vec![
        indicator("RSI:   ", format!("{:.2}", t.rsi), t.rsi_signal),
        indicator("MACD:  ", format!("{:.2}", t.macd), t.macd_signal),
        indicator("MA20:  ", format_currency(t.ma20, false), t.ma_signal),
        Line::raw(""),
        label_value("Support:    ", format_currency(t.support, false)),
        label_value("Resistance: ", format_currency(t.resistance, false)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Summary: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                analysis.summary.label(),
                Style::default()
                    .fg(sentiment_color(analysis.summary))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    panel::render_lines(frame, area, "Technical Analysis", lines);
}

fn render_trading_signal(frame: &mut Frame, area: Rect, analysis: &Analysis) {
    let signal = analysis.technical.overall_signal;
    let signal_color = match signal {
        TradeSignal::Buy => Color::Green,
        TradeSignal::Sell => Color::Red,
        TradeSignal::Hold => Color::Yellow,
    };
    let plan = &analysis.trade_plan;

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", signal.label()),
                Style::default()
                    .fg(Color::Black)
                    .bg(signal_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {}", analysis.strength.label())),
        ]),
        label_value("Entry:       ", format_currency(plan.entry, false)),
        label_value("Stop Loss:   ", format_currency(plan.stop_loss, false)),
        label_value("Take Profit: ", format_currency(plan.take_profit, false)),
    ];

    panel::render_lines(frame, area, "Trading Signal", lines);
}

fn prediction_line(label: &'static str, prediction: &Prediction) -> Line<'static> {
    let color = match prediction.direction {
        PredictionDirection::Bullish => Color::Green,
        PredictionDirection::Bearish => Color::Red,
        PredictionDirection::Sideways => Color::Yellow,
    };
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(prediction.direction.label(), Style::default().fg(color)),
        Span::raw(format!(" ({}% confidence)", prediction.confidence)),
    ])
}

fn render_predictions(frame: &mut Frame, area: Rect, analysis: &Analysis) {
    let targets = &analysis.targets;
    let lines = vec![
        prediction_line("Short term:  ", &analysis.short_term),
        prediction_line("Medium term: ", &analysis.medium_term),
        Line::from(vec![
            Span::styled("Targets:     ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_currency(targets.bullish, false),
                Style::default().fg(Color::Green),
            ),
            Span::raw(" / "),
            Span::styled(
                format_currency(targets.bearish, false),
                Style::default().fg(Color::Red),
            ),
        ]),
    ];

    panel::render_lines(frame, area, "Predictions", lines);
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[i]edit [a]nalyze [t]asset type [f]timeframe [r]efresh [Tab]watchlist [q]quit";

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
