use crate::card::{KidCard, PHOTO_PLACEHOLDER};

const SHEET_PADDING: f32 = 24.0;
const CARD_WIDTH: f32 = 420.0;
const CARD_HEIGHT: f32 = 96.0;
const CARD_GAP: f32 = 16.0;
const PHOTO_SIZE: f32 = 64.0;
const INNER_PADDING: f32 = 16.0;
const PILL_HEIGHT: f32 = 20.0;
const PILL_PADDING: f32 = 8.0;
const CHAR_WIDTH: f32 = 7.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub card: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub warning: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                card: "#21262d",
                border: "#c9d1d9",
                text: "#c9d1d9",
                muted: "#8b949e",
                accent: "#a371f7",
                warning: "#f2cc60",
            },
            Theme::Light => ThemeColors {
                bg: "#fdf6e3",
                card: "#ffffff",
                border: "#000000",
                text: "#24292f",
                muted: "#6a737d",
                accent: "#7c3aed",
                warning: "#fbbf24",
            },
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn pill_width(text: &str) -> f32 {
    text.chars().count() as f32 * CHAR_WIDTH + 2.0 * PILL_PADDING
}

/// A rounded label; returns the markup and its width.
fn build_pill(x: f32, y: f32, text: &str, class: &str) -> (String, f32) {
    let w = pill_width(text);
    let text_x = x + PILL_PADDING;
    let text_y = y + PILL_HEIGHT - 6.0;
    let markup = format!(
        r#"<rect x="{x}" y="{y}" width="{w}" height="{PILL_HEIGHT}" rx="10" class="{class}"/>
<text x="{text_x}" y="{text_y}" class="{class}-text">{}</text>
"#,
        escape_xml(text)
    );
    (markup, w)
}

fn build_photo(x: f32, y: f32, card: &KidCard) -> String {
    match &card.photo {
        Some(href) => format!(
            r#"<image x="{x}" y="{y}" width="{PHOTO_SIZE}" height="{PHOTO_SIZE}" href="{}" preserveAspectRatio="xMidYMid slice"/>
"#,
            escape_xml(href)
        ),
        None => {
            let cx = x + PHOTO_SIZE / 2.0;
            let cy = y + PHOTO_SIZE / 2.0 + 10.0;
            format!(
                r#"<text x="{cx}" y="{cy}" font-size="30px" text-anchor="middle">{PHOTO_PLACEHOLDER}</text>
"#
            )
        }
    }
}

fn build_card(index: usize, card: &KidCard) -> String {
    let x = SHEET_PADDING;
    let y = SHEET_PADDING + index as f32 * (CARD_HEIGHT + CARD_GAP);

    let photo_x = x + INNER_PADDING;
    let photo_y = y + (CARD_HEIGHT - PHOTO_SIZE) / 2.0;

    let info_x = photo_x + PHOTO_SIZE + INNER_PADDING;
    let name_y = y + 40.0;
    let row_y = y + 54.0;

    let mut out = format!(
        r#"<g id="kid-card-{id}">
<rect x="{x}" y="{y}" width="{CARD_WIDTH}" height="{CARD_HEIGHT}" rx="8" class="card"/>
<rect x="{photo_x}" y="{photo_y}" width="{PHOTO_SIZE}" height="{PHOTO_SIZE}" rx="8" class="photo"/>
"#,
        id = escape_xml(&card.id)
    );
    out.push_str(&build_photo(photo_x, photo_y, card));
    out.push_str(&format!(
        r#"<text x="{info_x}" y="{name_y}" class="name">{}</text>
"#,
        escape_xml(&card.name)
    ));

    let date_text = format!("📅 {}", card.birthday_label);
    out.push_str(&format!(
        r#"<text x="{info_x}" y="{}" class="muted">{}</text>
"#,
        row_y + PILL_HEIGHT - 6.0,
        escape_xml(&date_text)
    ));

    let mut pill_x = info_x + pill_width(&date_text);
    let (age_pill, age_w) = build_pill(pill_x, row_y, &card.age_label(), "age");
    out.push_str(&age_pill);
    pill_x += age_w + PILL_PADDING;

    if let Some(badge) = card.badge {
        let (badge_pill, _) = build_pill(pill_x, row_y, &badge.to_string(), "badge");
        out.push_str(&badge_pill);
    }

    out.push_str("</g>\n");
    out
}

/// Renders the cards top to bottom on one sheet.
pub fn generate_svg(cards: &[KidCard], theme: Theme) -> String {
    let colors = theme.colors();

    let rows = cards.len().max(1) as f32;
    let w = CARD_WIDTH + 2.0 * SHEET_PADDING;
    let h = rows * CARD_HEIGHT + (rows - 1.0) * CARD_GAP + 2.0 * SHEET_PADDING;

    let body = if cards.is_empty() {
        format!(
            r#"<text x="{SHEET_PADDING}" y="{}" class="muted">No kids yet</text>
"#,
            SHEET_PADDING + CARD_HEIGHT / 2.0
        )
    } else {
        cards
            .iter()
            .enumerate()
            .map(|(i, card)| build_card(i, card))
            .collect()
    };

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="Nunito,Helvetica,Arial,sans-serif"
     font-size="13px">

<style>
.card       {{ fill: {card}; stroke: {border}; stroke-width: 2; }}
.photo      {{ fill: {accent}; fill-opacity: 0.2; stroke: {border}; stroke-width: 2; }}
.name       {{ fill: {text}; font-size: 18px; font-weight: bold; }}
.muted      {{ fill: {muted}; }}
.age        {{ fill: {accent}; stroke: {border}; stroke-width: 1; }}
.age-text   {{ fill: #ffffff; font-size: 11px; font-weight: bold; }}
.badge      {{ fill: {warning}; stroke: {border}; stroke-width: 1; }}
.badge-text {{ fill: #000000; font-size: 11px; font-weight: bold; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

{body}
</svg>
"#,
        bg = colors.bg,
        card = colors.card,
        border = colors.border,
        text = colors.text,
        muted = colors.muted,
        accent = colors.accent,
        warning = colors.warning,
    )
}
