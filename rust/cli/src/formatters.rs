//! Card, board, action and snapshot formatters for terminal display.
//!
//! Suits use Unicode symbols where the terminal supports them:
//!
//! - **Unicode mode**: ♥ ♦ ♣ ♠
//! - **ASCII mode**: h d c s
//!
//! ```rust
//! use handlens_engine::cards::{Card, Rank, Suit};
//! use handlens_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades };
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use handlens_engine::cards::{Card, Suit};
use handlens_engine::reconstruct::{HandSnapshot, PlayerState};
use handlens_engine::record::{ActionEvent, SidePot};
use handlens_engine::summary::{HandSummary, PlayerDelta};

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.as_char().to_string()
    }
}

/// String like "A♠" (Unicode) or "As" (ASCII)
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.as_char(), format_suit(&card.suit))
}

/// Formatted board string like "[A♠ K♥ Q♦]" or "[]" if empty
pub fn format_board(cards: &[Card]) -> String {
    let formatted_cards: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted_cards.join(" "))
}

/// "alice raises 40", "bob folds"
pub fn format_action(name: &str, action: &ActionEvent) -> String {
    use handlens_engine::record::ActionKind;
    match action.action {
        ActionKind::Fold => format!("{} folds", name),
        ActionKind::Check => format!("{} checks", name),
        ActionKind::Call => format!("{} calls {}", name, action.amount),
        ActionKind::Bet => format!("{} bets {}", name, action.amount),
        ActionKind::Raise => format!("{} raises {}", name, action.amount),
        ActionKind::AllIn => format!("{} is all-in for {}", name, action.amount),
    }
}

pub fn format_side_pots(pots: &[SidePot]) -> String {
    let parts: Vec<String> = pots
        .iter()
        .map(|pot| {
            let seats: Vec<String> = pot.eligible_players.iter().map(|s| s.to_string()).collect();
            format!("{} [{}]", pot.amount, seats.join(","))
        })
        .collect();
    parts.join(" | ")
}

pub fn format_player(state: &PlayerState) -> String {
    let mut line = format!(
        "{:<12} seat {}  stack {:>7}  in {:>6}",
        state.name, state.seat, state.stack, state.committed
    );
    if state.folded {
        line.push_str("  folded");
    }
    if state.all_in {
        line.push_str("  all-in");
    }
    line
}

/// Multi-line rendering of one replay step.
pub fn format_snapshot(snapshot: &HandSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(action) = &snapshot.last_action {
        let name = snapshot
            .player(action.player)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| action.player.to_string());
        lines.push(format_action(&name, action));
    } else {
        lines.push("(no action yet)".to_string());
    }
    lines.push(format!(
        "{}  board {}",
        snapshot.street.name(),
        format_board(&snapshot.board)
    ));
    if snapshot.side_pots.is_empty() {
        lines.push(format!("pot {}", snapshot.pot));
    } else {
        lines.push(format!(
            "pot {}  side pots {}",
            snapshot.pot,
            format_side_pots(&snapshot.side_pots)
        ));
    }
    lines.extend(snapshot.players.values().map(format_player));
    lines
}

fn format_delta(entry: &PlayerDelta) -> String {
    format!(
        "{} {:+} ({} -> {})",
        entry.name, entry.delta, entry.starting_money, entry.final_money
    )
}

pub fn format_summary(summary: &HandSummary) -> Vec<String> {
    let list = |entries: &[PlayerDelta]| {
        if entries.is_empty() {
            "-".to_string()
        } else {
            entries.iter().map(format_delta).collect::<Vec<_>>().join(", ")
        }
    };
    vec![
        format!("winners: {}", list(&summary.winners)),
        format!("losers: {}", list(&summary.losers)),
        format!("net: {:+}", summary.net),
    ]
}
