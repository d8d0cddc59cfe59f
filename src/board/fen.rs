// src/board/fen.rs
// FEN parsing and printing. Six whitespace-separated fields: piece
// placement, active color, castling availability, en-passant target,
// halfmove clock, fullmove number.

use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color, Piece};
use crate::square::Square;
use std::fmt;

/// Reasons a FEN string failed to parse. Never produced from internal state,
/// only from attacker-controlled/user-controlled input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    WrongFieldCount(usize),
    BadPlacement(String),
    BadActiveColor(String),
    BadCastling(String),
    BadEnPassant(String),
    BadHalfmoveClock(String),
    BadFullmoveNumber(String),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount(n) => {
                write!(f, "FEN must have 6 fields, found {n}")
            }
            FenError::BadPlacement(s) => write!(f, "invalid piece placement field: {s}"),
            FenError::BadActiveColor(s) => write!(f, "invalid active color field: {s}"),
            FenError::BadCastling(s) => write!(f, "invalid castling field: {s}"),
            FenError::BadEnPassant(s) => write!(f, "invalid en passant field: {s}"),
            FenError::BadHalfmoveClock(s) => write!(f, "invalid halfmove clock: {s}"),
            FenError::BadFullmoveNumber(s) => write!(f, "invalid fullmove number: {s}"),
        }
    }
}

impl std::error::Error for FenError {}

impl From<FenError> for String {
    fn from(e: FenError) -> Self {
        e.to_string()
    }
}

impl Board {
    /// Reset `self` and populate it from a FEN string.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount(fields.len()));
        }

        let mut board = Board::new_empty();

        parse_placement(&mut board, fields[0])?;

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadActiveColor(other.to_string())),
        };

        board.castling_rights = parse_castling(fields[2])?;
        board.en_passant = parse_en_passant(fields[3])?;

        board.halfmove_clock = fields[4]
            .parse()
            .map_err(|_| FenError::BadHalfmoveClock(fields[4].to_string()))?;
        board.fullmove_number = fields[5]
            .parse()
            .map_err(|_| FenError::BadFullmoveNumber(fields[5].to_string()))?;

        board.refresh_zobrist();
        board.history.clear();

        *self = board;
        Ok(())
    }

    /// Serialize the current position back to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8u8).rev() {
            let mut empty_run = 0u8;
            for file in 0..8u8 {
                let sq = Square::from_file_rank(file, rank);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            placement.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        placement.push(PC_TO_CHAR[pc_index(piece, color)]);
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank != 0 {
                placement.push('/');
            }
        }

        let active_color = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        if self.castling_rights & CASTLE_WK != 0 {
            castling.push('K');
        }
        if self.castling_rights & CASTLE_WQ != 0 {
            castling.push('Q');
        }
        if self.castling_rights & CASTLE_BK != 0 {
            castling.push('k');
        }
        if self.castling_rights & CASTLE_BQ != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = match self.en_passant {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{placement} {active_color} {castling} {en_passant} {} {}",
            self.halfmove_clock, self.fullmove_number
        )
    }
}

#[inline]
fn pc_index(piece: Piece, color: Color) -> usize {
    (color as usize) * 6 + (piece as usize)
}

fn parse_placement(board: &mut Board, field: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::BadPlacement(field.to_string()));
    }

    // FEN ranks run 8 -> 1, top to bottom.
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top as u8;
        let mut file: u8 = 0;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
                if file > 8 {
                    return Err(FenError::BadPlacement(field.to_string()));
                }
                continue;
            }
            if file >= 8 {
                return Err(FenError::BadPlacement(field.to_string()));
            }
            let idx = c as usize;
            let (piece, color) = if idx < 128 { CHAR_TO_PC[idx] } else { None }
                .ok_or_else(|| FenError::BadPlacement(field.to_string()))?;
            let sq = Square::from_file_rank(file, rank);
            let bb = board.bb(color, piece) | sq.bit();
            board.set_bb(color, piece, bb);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadPlacement(field.to_string()));
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<u8, FenError> {
    if field == "-" {
        return Ok(0);
    }
    let mut rights = 0u8;
    for c in field.chars() {
        rights |= match c {
            'K' => CASTLE_WK,
            'Q' => CASTLE_WQ,
            'k' => CASTLE_BK,
            'q' => CASTLE_BQ,
            _ => return Err(FenError::BadCastling(field.to_string())),
        };
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    field
        .parse::<Square>()
        .map(Some)
        .map_err(|_| FenError::BadEnPassant(field.to_string()))
}
