use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::Html,
};
use chrono::NaiveDate;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{info, warn};

use crate::handlers::api::{today, AppState};
use crate::models::booking::BookingDraft;
use crate::models::common::BookingFormParams;
use crate::services::booking_form::{default_draft, BookingForm};
use crate::services::time_slots::SLOT_MINUTES;

// Banner shown above the form after a submit attempt
pub enum Notice {
    Error(String),
    Sent { message: String, whatsapp_link: String },
}

// Rebuild the draft from whatever the browser sent back
fn draft_from_params(state: &AppState, params: &BookingFormParams, today: NaiveDate) -> BookingDraft {
    let mut draft = default_draft(&state.catalog, today);

    if let Some(barber_id) = params.barber.as_deref() {
        match state.catalog.barber(barber_id) {
            Some(barber) => draft.barber_id = barber.id.clone(),
            None => warn!("Ignoring unknown barber {} from form", barber_id),
        }
    }

    if let Some(service_id) = params.service.as_deref() {
        draft.service_id = state
            .catalog
            .service(service_id)
            .map(|service| service.id.clone());
    }

    if let Some(date) = params.date.as_deref().filter(|date| !date.is_empty()) {
        match date.parse::<NaiveDate>() {
            Ok(date) => draft.date = date,
            Err(e) => warn!("Ignoring unparsable date {:?} from form: {}", date, e),
        }
    }

    draft.time = params.time.clone().unwrap_or_default();
    draft.customer_name = params.name.clone().unwrap_or_default();
    draft.customer_contact = params.phone.clone().unwrap_or_default();

    draft
}

// Booking page, re-rendered with the current selections
pub async fn booking_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookingFormParams>,
) -> Html<String> {
    let today = today();
    let draft = draft_from_params(&state, &params, today);
    let mut form = BookingForm::with_draft(&state.catalog, state.opener.as_ref(), today, draft);
    form.refresh();

    Html(render_page(&form, None))
}

// Booking form submission
pub async fn submit_booking_form(
    State(state): State<Arc<AppState>>,
    Form(params): Form<BookingFormParams>,
) -> (StatusCode, Html<String>) {
    info!("Received booking form for barber {:?}", params.barber);

    let today = today();
    let draft = draft_from_params(&state, &params, today);
    let mut form = BookingForm::with_draft(&state.catalog, state.opener.as_ref(), today, draft);
    form.refresh();

    match form.submit() {
        Ok(confirmation) => {
            let notice = Notice::Sent {
                message: confirmation.notice,
                whatsapp_link: confirmation.whatsapp_link,
            };
            (StatusCode::OK, Html(render_page(&form, Some(&notice))))
        }
        Err(err) => {
            let notice = Notice::Error(err.to_string());
            (err.status_code(), Html(render_page(&form, Some(&notice))))
        }
    }
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        " selected"
    } else {
        ""
    }
}

pub fn render_page(form: &BookingForm<'_>, notice: Option<&Notice>) -> String {
    let draft = form.draft();
    let summary = form.summary();
    let slots = form.available_slots();
    let mut html = String::new();

    html.push_str(PAGE_HEAD);

    match notice {
        Some(Notice::Error(message)) => {
            let _ = write!(html, r#"<div class="notice error">{}</div>"#, escape_html(message));
        }
        Some(Notice::Sent {
            message,
            whatsapp_link,
        }) => {
            let _ = write!(
                html,
                r#"<div class="notice sent">{} <a href="{}" target="_blank" rel="noreferrer">Abrir WhatsApp</a></div>"#,
                escape_html(message),
                escape_html(whatsapp_link)
            );
            let script_link =
                serde_json::to_string(whatsapp_link).unwrap_or_else(|_| "\"\"".to_string());
            let _ = write!(
                html,
                r#"<script>window.open({}, "_blank");</script>"#,
                script_link.replace("</", "<\\/")
            );
        }
        None => {}
    }

    html.push_str(r#"<main><form method="get" action="/">"#);

    html.push_str(r#"<label>Barbeiro<select name="barber">"#);
    for barber in form.catalog().barbers() {
        let _ = write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            escape_html(&barber.id),
            selected(barber.id == draft.barber_id),
            escape_html(&barber.name)
        );
    }
    html.push_str("</select></label>");

    html.push_str(r#"<label>Procedimento<select name="service">"#);
    if draft.service_id.is_none() {
        html.push_str(r#"<option value="" selected>-- Escolha um procedimento --</option>"#);
    }
    for service in form.eligible_services() {
        let _ = write!(
            html,
            r#"<option value="{}"{}>{} — {}</option>"#,
            escape_html(&service.id),
            selected(draft.service_id.as_deref() == Some(service.id.as_str())),
            escape_html(&service.label),
            service.price_label()
        );
    }
    html.push_str("</select></label>");

    let _ = write!(
        html,
        r#"<label>Data<input type="date" name="date" value="{}"><p class="hint">Segunda a sexta (confira horários). Domingo fechado. Sábado: Pereira — ordem de chegada; Japa — favor confirmar por WhatsApp.</p></label>"#,
        draft.date.format("%Y-%m-%d")
    );

    html.push_str(r#"<label>Horário<select name="time">"#);
    let _ = write!(
        html,
        r#"<option value=""{}>-- Escolha um horário --</option>"#,
        selected(draft.time.is_empty())
    );
    if slots.is_empty() {
        html.push_str(r#"<option value="" disabled>Nenhum horário disponível para essa data</option>"#);
    }
    for slot in &slots {
        let _ = write!(
            html,
            r#"<option value="{0}"{1}>{0}</option>"#,
            escape_html(slot),
            selected(*slot == draft.time)
        );
    }
    html.push_str("</select></label>");

    let _ = write!(
        html,
        r#"<label>Nome do cliente<input name="name" value="{}" placeholder="Nome completo"></label>"#,
        escape_html(&draft.customer_name)
    );
    let _ = write!(
        html,
        r#"<label>WhatsApp (ex: 54999111xxxx)<input name="phone" value="{}" placeholder="(DDD) 9xxxx-xxxx"></label>"#,
        escape_html(&draft.customer_contact)
    );

    html.push_str(r#"<button type="submit" class="secondary">Atualizar horários</button>"#);
    html.push_str(
        r#"<button type="submit" formaction="/agendar" formmethod="post">Confirmar agendamento</button>"#,
    );
    html.push_str("</form>");

    html.push_str(r#"<aside><h3>Resumo</h3>"#);
    let _ = write!(
        html,
        "<p><strong>Barbeiro:</strong> {}</p><p><strong>Procedimento:</strong> {} — {}</p><p><strong>Data:</strong> {}</p><p><strong>Horário:</strong> {}{}</p>",
        escape_html(&summary.barber_name),
        escape_html(summary.service_label.as_deref().unwrap_or("")),
        summary.price_label,
        summary.date.format("%Y-%m-%d"),
        escape_html(&summary.time),
        summary
            .ends_at
            .as_deref()
            .map(|end| format!(" (até {})", end))
            .unwrap_or_default()
    );

    let _ = write!(
        html,
        "<h4>Observações importantes</h4><ul><li>Todos os serviços duram {} minutos.</li><li>Sábado: Pereira — atendimento por ordem de chegada (não agende online para Pereira). Japa — favor confirmar por WhatsApp.</li><li>Ao confirmar, abriremos o WhatsApp do barbeiro.</li><li>Domingo: barbearia fechada.</li></ul>",
        SLOT_MINUTES
    );

    html.push_str("<h4>Contatos</h4>");
    for barber in form.catalog().barbers() {
        let _ = write!(
            html,
            r#"<p>{}: <a href="{}" target="_blank" rel="noreferrer">{}</a></p>"#,
            escape_html(&barber.name),
            escape_html(&barber.contact_link()),
            escape_html(&barber.whatsapp)
        );
    }
    html.push_str("</aside></main>");

    html.push_str(PAGE_FOOT);
    html
}

const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Barbiere di Pereira - Agendamento</title>
<style>
body { margin: 0; min-height: 100vh; background: #000; color: #fff; font-family: sans-serif; display: flex; align-items: center; justify-content: center; }
.card { width: 100%; max-width: 980px; background: linear-gradient(180deg, #111, #000); border-radius: 18px; padding: 28px; }
header { display: flex; gap: 16px; align-items: center; margin-bottom: 18px; }
.logo { width: 64px; height: 64px; border-radius: 32px; background: #c59a3a; color: #000; font-weight: 700; display: flex; align-items: center; justify-content: center; }
main { display: flex; gap: 24px; flex-wrap: wrap; }
form { flex: 1; display: flex; flex-direction: column; gap: 12px; }
select, input { width: 100%; margin-top: 6px; padding: 8px; border-radius: 8px; background: #111; color: #fff; }
button { padding: 12px; border-radius: 12px; background: #c59a3a; color: #000; font-weight: 700; }
button.secondary { background: #333; color: #fff; }
aside { width: 360px; background: #0d0d0d; padding: 16px; border-radius: 12px; }
a { color: #c59a3a; }
.hint { font-size: 12px; color: #999; }
.notice { padding: 12px; border-radius: 8px; margin-bottom: 12px; }
.notice.error { background: #5a1d1d; }
.notice.sent { background: #1d3a1d; }
footer { text-align: center; margin-top: 18px; color: #777; }
</style>
</head>
<body>
<div class="card">
<header><div class="logo">BDP</div><div><h1>BARBIERE DI PEREIRA</h1><p>Agende seu atendimento — cortes de 40 minutos</p></div></header>
"##;

const PAGE_FOOT: &str = r#"<footer>© BARBIERE DI PEREIRA</footer>
</div>
</body>
</html>
"#;
