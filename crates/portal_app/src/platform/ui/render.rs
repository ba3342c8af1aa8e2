use portal_core::{
    AppViewModel, HealthRowView, Notice, Page, PageStatus, SearchViewModel, ServiceHealth,
    Severity, UploadViewModel,
};

use super::constants::*;

/// Renders the page in focus as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    match view.focus {
        Page::Search => render_search(&view.search),
        Page::Upload => render_upload(&view.upload),
        Page::Health => render_health(&view.health),
    }
}

fn render_search(view: &SearchViewModel) -> Vec<String> {
    let mut lines = vec!["== Search ==".to_string()];
    push_notice(&mut lines, view.status, view.notice.as_ref());
    for row in &view.rows {
        lines.push(format!("{}. {}", row.position, row.title));
        lines.push(format!("   {}", row.link));
        lines.push(format!("   {}", row.snippet));
    }
    if view.status == PageStatus::Success && !view.rows.is_empty() {
        lines.push(format!("{} result(s)", view.rows.len()));
    }
    lines
}

fn render_upload(view: &UploadViewModel) -> Vec<String> {
    let mut lines = vec!["== Upload ==".to_string()];
    push_notice(&mut lines, view.status, view.notice.as_ref());
    if view.status == PageStatus::Error && !view.input.trim().is_empty() {
        lines.push(format!("(kept for retry: {})", view.input.trim()));
    }
    lines
}

fn render_health(rows: &[HealthRowView]) -> Vec<String> {
    let mut lines = vec!["== Health ==".to_string()];
    for row in rows {
        let state = match &row.health {
            ServiceHealth::Unknown => "not checked".to_string(),
            ServiceHealth::Checking => format!("checking{LOADING_MARK}"),
            ServiceHealth::Up { service } => format!("up ({service})"),
            ServiceHealth::Down { reason } => format!("down ({reason})"),
        };
        lines.push(format!("{:<7} {}", row.service.to_string(), state));
    }
    lines
}

fn push_notice(lines: &mut Vec<String>, status: PageStatus, notice: Option<&Notice>) {
    let Some(notice) = notice else {
        return;
    };
    let mark = match (status, notice.severity) {
        (PageStatus::Loading, _) => LOADING_MARK,
        (_, Severity::Error) => ERROR_MARK,
        (_, Severity::Success) => SUCCESS_MARK,
        (_, Severity::Information) => "",
    };
    for (index, text) in notice.text.lines().enumerate() {
        if index == 0 && !mark.is_empty() {
            lines.push(format!("{mark} {text}"));
        } else {
            lines.push(text.to_string());
        }
    }
}
