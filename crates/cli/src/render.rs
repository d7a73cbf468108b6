use colored::Colorize;
use newsdesk_core::notice::{Notice, NoticeKind};
use newsdesk_core::view::{Polarity, ResultView, SessionView, StockCardView};

pub fn loading(view: &SessionView<'_>) -> String {
    format!("⏳ {}", view.submit_label)
}

pub fn notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Blocking => format!("⚠ {}", notice.message).yellow().to_string(),
        NoticeKind::Confirmation => format!("✔ {}", notice.message).green().to_string(),
        NoticeKind::Failure => format!("✖ {}", notice.message).red().to_string(),
    }
}

pub fn session(view: &SessionView<'_>) -> String {
    if let Some(error) = view.error {
        return error.red().to_string();
    }
    match &view.result {
        Some(result) => result_view(result),
        None => String::new(),
    }
}

fn result_view(result: &ResultView<'_>) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "뉴스 요약".bold()));
    out.push_str(&format!("{}\n\n", result.summary));

    out.push_str(&format!("{}\n", "관련 테마".bold()));
    let tags: Vec<String> = result.themes.iter().map(|t| format!("#{t}")).collect();
    out.push_str(&format!("{}\n\n", tags.join(" ")));

    if let Some(news) = result.news {
        out.push_str(&format!("{}\n", "참고 뉴스".bold()));
        for item in news {
            out.push_str(&format!("- {} ({})\n", item.title, item.date.dimmed()));
            out.push_str(&format!("  {}\n", item.link.underline()));
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", "추천 종목".bold()));
    for card in &result.cards {
        out.push_str(&stock_card(card));
        out.push('\n');
    }

    out.trim_end().to_string()
}

/// Korean convention: red for up, blue for down.
fn stock_card(card: &StockCardView<'_>) -> String {
    let quote = match &card.price_text {
        Some(price) => format!("{price} {}", card.change_text),
        None => card.change_text.clone(),
    };
    let quote = match card.polarity {
        Polarity::Up => quote.red(),
        Polarity::Down => quote.blue(),
    };

    let mut out = format!(
        "{} ({})  [{}]\n  {quote}\n  추천 사유: {}\n",
        card.name.bold(),
        card.ticker,
        card.market,
        card.reason
    );
    if let Some(chart) = &card.chart_src {
        out.push_str(&format!("  차트: {chart}\n"));
    }
    out
}
