//! In-memory model reader for stage tests.

use spexport_core::{ModelReader, PieceFlags};

pub(crate) struct FakeModel {
    pieces: Vec<(String, f32, PieceFlags)>,
}

impl FakeModel {
    pub fn new() -> Self {
        Self { pieces: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    fn push(mut self, piece: &str, score: f32, flags: PieceFlags) -> Self {
        self.pieces.push((piece.to_string(), score, flags));
        self
    }

    pub fn normal(self, piece: &str, score: f32) -> Self {
        self.push(piece, score, PieceFlags::default())
    }

    pub fn unknown(self, piece: &str) -> Self {
        let flags = PieceFlags {
            unknown: true,
            ..Default::default()
        };
        self.push(piece, 0.0, flags)
    }

    pub fn control(self, piece: &str) -> Self {
        let flags = PieceFlags {
            control: true,
            ..Default::default()
        };
        self.push(piece, 0.0, flags)
    }

    pub fn unused(self, piece: &str) -> Self {
        let flags = PieceFlags {
            unused: true,
            ..Default::default()
        };
        self.push(piece, 0.0, flags)
    }

    pub fn byte(self, piece: &str) -> Self {
        let flags = PieceFlags {
            byte: true,
            ..Default::default()
        };
        self.push(piece, 0.0, flags)
    }
}

impl ModelReader for FakeModel {
    fn vocab_size(&self) -> usize {
        self.pieces.len()
    }

    fn piece(&self, id: u32) -> &str {
        &self.pieces[id as usize].0
    }

    fn score(&self, id: u32) -> f32 {
        self.pieces[id as usize].1
    }

    fn is_unknown(&self, id: u32) -> bool {
        self.pieces[id as usize].2.unknown
    }

    fn is_control(&self, id: u32) -> bool {
        self.pieces[id as usize].2.control
    }

    fn is_unused(&self, id: u32) -> bool {
        self.pieces[id as usize].2.unused
    }

    fn is_byte(&self, id: u32) -> bool {
        self.pieces[id as usize].2.byte
    }
}
