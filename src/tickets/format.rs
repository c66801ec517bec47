//! Wager formats (bet type × method)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::FormatInfo;

/// Ticket generation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TicketError {
    #[error("未対応方式: {bet_type} {method}")]
    UnsupportedFormat { bet_type: String, method: String },
    #[error("枠番重複: {lane}号艇")]
    DuplicateLane { lane: u8 },
}

/// Bet type (券種)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BetType {
    /// 単勝
    Win,
    /// 複勝
    Place,
    /// 2連単
    Exacta,
    /// 2連複
    Quinella,
    /// 3連単
    Trifecta,
    /// 3連複
    Trio,
}

impl BetType {
    pub const ALL: [BetType; 6] = [
        BetType::Win,
        BetType::Place,
        BetType::Exacta,
        BetType::Quinella,
        BetType::Trifecta,
        BetType::Trio,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BetType::Win => "単勝",
            BetType::Place => "複勝",
            BetType::Exacta => "2連単",
            BetType::Quinella => "2連複",
            BetType::Trifecta => "3連単",
            BetType::Trio => "3連複",
        }
    }

    /// Lanes per ticket
    pub fn width(&self) -> usize {
        match self {
            BetType::Win | BetType::Place => 1,
            BetType::Exacta | BetType::Quinella => 2,
            BetType::Trifecta | BetType::Trio => 3,
        }
    }

    /// Whether finishing order matters
    pub fn is_ordered(&self) -> bool {
        matches!(self, BetType::Exacta | BetType::Trifecta)
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BetType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "単勝" => Ok(BetType::Win),
            "複勝" => Ok(BetType::Place),
            "2連単" | "２連単" => Ok(BetType::Exacta),
            "2連複" | "２連複" => Ok(BetType::Quinella),
            "3連単" | "３連単" => Ok(BetType::Trifecta),
            "3連複" | "３連複" => Ok(BetType::Trio),
            _ => Err(()),
        }
    }
}

/// Number of boats in a three-lane box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxSize {
    Three,
    Four,
    Five,
}

impl BoxSize {
    pub fn boats(&self) -> usize {
        match self {
            BoxSize::Three => 3,
            BoxSize::Four => 4,
            BoxSize::Five => 5,
        }
    }
}

/// Methods for two-lane bets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairMethod {
    Normal,
    OneAxis,
    Box,
}

impl PairMethod {
    pub const ALL: [PairMethod; 3] = [PairMethod::Normal, PairMethod::OneAxis, PairMethod::Box];

    pub fn label(&self) -> &'static str {
        match self {
            PairMethod::Normal => "通常",
            PairMethod::OneAxis => "1軸流し",
            PairMethod::Box => "ボックス",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "通常" => Some(PairMethod::Normal),
            "1軸流し" | "1軸" => Some(PairMethod::OneAxis),
            "ボックス" | "BOX" | "box" => Some(PairMethod::Box),
            _ => None,
        }
    }
}

/// Methods for three-lane bets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripleMethod {
    Normal,
    OneAxis,
    TwoAxis,
    Box(BoxSize),
}

impl TripleMethod {
    pub const ALL: [TripleMethod; 6] = [
        TripleMethod::Normal,
        TripleMethod::OneAxis,
        TripleMethod::TwoAxis,
        TripleMethod::Box(BoxSize::Three),
        TripleMethod::Box(BoxSize::Four),
        TripleMethod::Box(BoxSize::Five),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TripleMethod::Normal => "通常",
            TripleMethod::OneAxis => "1軸流し",
            TripleMethod::TwoAxis => "2軸流し",
            TripleMethod::Box(BoxSize::Three) => "3艇ボックス",
            TripleMethod::Box(BoxSize::Four) => "4艇ボックス",
            TripleMethod::Box(BoxSize::Five) => "5艇ボックス",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "通常" => Some(TripleMethod::Normal),
            "1軸流し" | "1軸" => Some(TripleMethod::OneAxis),
            "2軸流し" | "2軸" => Some(TripleMethod::TwoAxis),
            "3艇ボックス" | "3艇BOX" => Some(TripleMethod::Box(BoxSize::Three)),
            "4艇ボックス" | "4艇BOX" => Some(TripleMethod::Box(BoxSize::Four)),
            "5艇ボックス" | "5艇BOX" => Some(TripleMethod::Box(BoxSize::Five)),
            _ => None,
        }
    }
}

/// A supported (bet type, method) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WagerFormat {
    Win,
    Place,
    Exacta(PairMethod),
    Quinella(PairMethod),
    Trifecta(TripleMethod),
    Trio(TripleMethod),
}

impl WagerFormat {
    /// Parse the Japanese bet-type and method labels
    pub fn parse(bet_type: &str, method: &str) -> Result<Self, TicketError> {
        let unsupported = || TicketError::UnsupportedFormat {
            bet_type: bet_type.to_string(),
            method: method.to_string(),
        };

        let kind: BetType = bet_type.parse().map_err(|_| unsupported())?;
        let method_label = method.trim();

        let format = match kind {
            BetType::Win if method_label == "通常" => Some(WagerFormat::Win),
            BetType::Place if method_label == "通常" => Some(WagerFormat::Place),
            BetType::Win | BetType::Place => None,
            BetType::Exacta => PairMethod::parse(method_label).map(WagerFormat::Exacta),
            BetType::Quinella => PairMethod::parse(method_label).map(WagerFormat::Quinella),
            BetType::Trifecta => TripleMethod::parse(method_label).map(WagerFormat::Trifecta),
            BetType::Trio => TripleMethod::parse(method_label).map(WagerFormat::Trio),
        };

        format.ok_or_else(unsupported)
    }

    pub fn bet_type(&self) -> BetType {
        match self {
            WagerFormat::Win => BetType::Win,
            WagerFormat::Place => BetType::Place,
            WagerFormat::Exacta(_) => BetType::Exacta,
            WagerFormat::Quinella(_) => BetType::Quinella,
            WagerFormat::Trifecta(_) => BetType::Trifecta,
            WagerFormat::Trio(_) => BetType::Trio,
        }
    }

    pub fn method_label(&self) -> &'static str {
        match self {
            WagerFormat::Win | WagerFormat::Place => "通常",
            WagerFormat::Exacta(m) | WagerFormat::Quinella(m) => m.label(),
            WagerFormat::Trifecta(m) | WagerFormat::Trio(m) => m.label(),
        }
    }

    /// Every supported format, grouped by bet type
    pub fn all() -> Vec<WagerFormat> {
        let mut formats = vec![WagerFormat::Win, WagerFormat::Place];
        formats.extend(PairMethod::ALL.iter().map(|&m| WagerFormat::Exacta(m)));
        formats.extend(PairMethod::ALL.iter().map(|&m| WagerFormat::Quinella(m)));
        formats.extend(TripleMethod::ALL.iter().map(|&m| WagerFormat::Trifecta(m)));
        formats.extend(TripleMethod::ALL.iter().map(|&m| WagerFormat::Trio(m)));
        formats
    }

    pub fn info(&self) -> FormatInfo {
        FormatInfo {
            bet_type: self.bet_type().label().to_string(),
            method: self.method_label().to_string(),
        }
    }
}

impl fmt::Display for WagerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bet_type(), self.method_label())
    }
}
