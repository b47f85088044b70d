//! Custom actions for the Lesson actor.
//!
//! Capacity changes driven by orders go through these actions rather than a
//! plain update, so the check and the write happen in the same message.

/// Capacity operations on a single lesson.
#[derive(Debug, Clone, PartialEq)]
pub enum LessonAction {
    /// Reads the remaining capacity.
    CheckSpaces,
    /// Takes the given number of spaces, failing if fewer remain.
    ReserveSpaces(u32),
    /// Gives back spaces taken by an earlier reservation.
    ReleaseSpaces(u32),
}

/// Results from LessonActions; each carries the capacity left afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum LessonActionResult {
    CheckSpaces(u32),
    ReserveSpaces(u32),
    ReleaseSpaces(u32),
}

impl LessonActionResult {
    pub fn remaining(&self) -> u32 {
        match *self {
            Self::CheckSpaces(n) | Self::ReserveSpaces(n) | Self::ReleaseSpaces(n) => n,
        }
    }
}
