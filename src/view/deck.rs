//! Card deck layout and rendering.
//!
//! Cards at offset −1, 0 and +1 are drawn as a fan: neighbours peek out
//! behind the active card, which follows the drag. Rendering also records
//! where interactive elements landed so mouse-downs can be matched to an
//! [`InteractionRole`].

use crate::model::{InteractionRole, ScreenKind};
use crate::state::{CardStack, DragFeedback};
use crate::view::constants::{
    CARD_WIDTH_PERCENT, FAN_STEP_COLUMNS, FAN_STEP_ROWS, INDICATOR_HEIGHT, MIN_CARD_WIDTH,
    STATUS_BAR_HEIGHT, TILT_MARKER_DEG,
};
use crate::view::content::CheckinScreens;
use crate::view::indicator::PositionIndicator;
use crate::view::styles::CardStyles;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

const KEY_HINTS: &str = "←/→ swipe  n new  s stats  m map  e edit  w save  d discard  q quit";

/// An interactive element's screen area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    /// Cells covered.
    pub area: Rect,
    /// What the element is.
    pub role: InteractionRole,
}

/// Where the last frame put things.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckLayout {
    /// Area holding the cards.
    pub deck_area: Rect,
    /// Active card, if drawn.
    pub active_card: Option<Rect>,
    /// Interactive elements, in drawing order.
    pub regions: Vec<HitRegion>,
}

impl DeckLayout {
    /// Role of whatever is under the cell; [`InteractionRole::Surface`] when
    /// nothing interactive is there.
    pub fn role_at(&self, column: u16, row: u16) -> InteractionRole {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|region| region.area.contains(position))
            .map_or(InteractionRole::Surface, |region| region.role)
    }
}

/// One card to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    /// Registry index.
    pub index: usize,
    /// Screen kind.
    pub kind: ScreenKind,
    /// Stack offset.
    pub offset: i32,
    /// Cells covered, already clipped to the deck.
    pub area: Rect,
    /// Total lean in degrees (resting tilt plus drag rotation).
    pub lean_deg: f64,
    /// Opacity from the drag feedback; 1 for neighbours.
    pub opacity: f64,
}

impl CardPlacement {
    /// This is the card in front.
    pub fn is_active(&self) -> bool {
        self.offset == 0
    }
}

/// Area of a card at `offset`, shifted by `shift` columns.
///
/// Returns `None` when the card would be too small or entirely off-deck.
pub fn card_rect(area: Rect, offset: i32, shift: i32) -> Option<Rect> {
    let depth = u16::try_from(offset.unsigned_abs()).ok()?;
    let width = (u32::from(area.width) * u32::from(CARD_WIDTH_PERCENT) / 100)
        .max(u32::from(MIN_CARD_WIDTH))
        .min(u32::from(area.width));
    let width = i32::try_from(width).ok()?;

    let inset = FAN_STEP_ROWS.checked_mul(depth)?;
    let height = area.height.checked_sub(inset.checked_mul(2)?)?;
    if height < 3 {
        return None;
    }

    let left = i32::from(area.x) + (i32::from(area.width) - width) / 2
        + offset * FAN_STEP_COLUMNS
        + shift;
    let clip_left = left.max(i32::from(area.x));
    let clip_right = (left + width).min(i32::from(area.right()));
    if clip_right - clip_left < 2 {
        return None;
    }

    Some(Rect::new(
        u16::try_from(clip_left).ok()?,
        area.y + inset,
        u16::try_from(clip_right - clip_left).ok()?,
        height,
    ))
}

/// Drag translation in columns.
pub fn shift_columns(feedback: &DragFeedback, px_per_column: f64) -> i32 {
    if px_per_column <= 0.0 || !feedback.translate_x.is_finite() {
        return 0;
    }
    // Bounded by the clip in `card_rect`; the cast saturates.
    (feedback.translate_x / px_per_column).round() as i32
}

/// Cards to draw, back to front.
pub fn plan_cards(deck_area: Rect, stack: &CardStack, px_per_column: f64) -> Vec<CardPlacement> {
    let feedback = stack.feedback();
    let shift = shift_columns(&feedback, px_per_column);

    let mut placements: Vec<CardPlacement> = stack
        .projections()
        .into_iter()
        .filter(|p| p.offset.abs() <= 1)
        .filter_map(|p| {
            let (card_shift, lean, opacity) = if p.is_active {
                (shift, p.tilt_deg + feedback.rotation_deg, feedback.opacity)
            } else {
                (0, p.tilt_deg, 1.0)
            };
            let area = card_rect(deck_area, p.offset, card_shift)?;
            Some(CardPlacement {
                index: p.index,
                kind: p.kind,
                offset: p.offset,
                area,
                lean_deg: lean,
                opacity,
            })
        })
        .collect();

    placements.sort_by_key(|c| std::cmp::Reverse(c.offset.abs()));
    placements
}

/// Cut `text` to at most `max_width` display columns.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

fn lean_marker(lean_deg: f64) -> &'static str {
    if lean_deg > TILT_MARKER_DEG {
        " ↻"
    } else if lean_deg < -TILT_MARKER_DEG {
        " ↺"
    } else {
        ""
    }
}

/// Draw the deck, indicator and status line. Returns the hit layout.
pub fn render_deck(
    frame: &mut Frame,
    stack: &CardStack,
    content: &CheckinScreens,
    styles: &CardStyles,
    px_per_column: f64,
) -> DeckLayout {
    let [deck_area, indicator_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(INDICATOR_HEIGHT),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(frame.area());

    let mut layout = DeckLayout {
        deck_area,
        ..DeckLayout::default()
    };

    if !stack.is_enabled() {
        frame.render_widget(
            Paragraph::new("No screens registered").alignment(Alignment::Center),
            deck_area,
        );
    }

    for card in plan_cards(deck_area, stack, px_per_column) {
        let is_active = card.is_active();
        let title = format!(" {}{} ", card.kind.title(), lean_marker(card.lean_deg));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, styles.accent(card.kind)))
            .border_style(styles.card_border(card.kind, is_active, card.opacity));
        let inner = block.inner(card.area);

        frame.render_widget(Clear, card.area);
        frame.render_widget(block, card.area);

        if !is_active {
            continue;
        }
        layout.active_card = Some(card.area);

        let max_width = usize::from(inner.width);
        let body = content.body(card.kind);
        let mut lines = Vec::with_capacity(body.len());
        for (row, line) in body.iter().enumerate() {
            let Ok(row) = u16::try_from(row) else { break };
            if row >= inner.height {
                break;
            }
            if let Some(role) = line.role {
                layout.regions.push(HitRegion {
                    area: Rect::new(inner.x, inner.y + row, inner.width, 1),
                    role,
                });
            }
            lines.push(Line::from(truncate_to_width(&line.text, max_width)));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    let indicator = PositionIndicator::new(stack.indicator());
    frame.render_widget(
        Paragraph::new(indicator.render(styles)).alignment(Alignment::Center),
        indicator_area,
    );

    let (status, is_notice) = match content.notice() {
        Some(notice) => (notice, true),
        None => (KEY_HINTS, false),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            truncate_to_width(status, usize::from(status_area.width)),
            styles.status(is_notice),
        )),
        status_area,
    );

    layout
}
