//! The four personality axes and their letters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label value every axis model uses for its first letter.
///
/// Two of the trained models emit float labels (`1.0`) and two emit integer
/// labels (`1`); both compare equal here, so a single sentinel covers them.
pub const POSITIVE_LABEL: f64 = 1.0;

/// One binary personality dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// I / E
    IntroversionExtraversion,
    /// S / N
    SensingIntuition,
    /// T / F
    ThinkingFeeling,
    /// P / J
    PerceivingJudging,
}

impl Axis {
    /// All axes in code order.
    pub const ALL: [Axis; 4] = [
        Axis::IntroversionExtraversion,
        Axis::SensingIntuition,
        Axis::ThinkingFeeling,
        Axis::PerceivingJudging,
    ];

    /// Position of this axis' letter in a personality code.
    pub fn position(self) -> usize {
        match self {
            Axis::IntroversionExtraversion => 0,
            Axis::SensingIntuition => 1,
            Axis::ThinkingFeeling => 2,
            Axis::PerceivingJudging => 3,
        }
    }

    /// Letter emitted when the majority label is [`POSITIVE_LABEL`].
    pub fn positive_letter(self) -> char {
        match self {
            Axis::IntroversionExtraversion => 'I',
            Axis::SensingIntuition => 'S',
            Axis::ThinkingFeeling => 'T',
            Axis::PerceivingJudging => 'P',
        }
    }

    /// Letter emitted for any other majority label.
    pub fn negative_letter(self) -> char {
        match self {
            Axis::IntroversionExtraversion => 'E',
            Axis::SensingIntuition => 'N',
            Axis::ThinkingFeeling => 'F',
            Axis::PerceivingJudging => 'J',
        }
    }

    /// Map a majority label to this axis' letter.
    pub fn letter_for(self, majority: f64) -> char {
        if majority == POSITIVE_LABEL {
            self.positive_letter()
        } else {
            self.negative_letter()
        }
    }

    /// Both letters this axis may produce.
    pub fn letters(self) -> [char; 2] {
        [self.positive_letter(), self.negative_letter()]
    }

    /// Model file name for this axis inside the model directory.
    pub fn model_file(self) -> &'static str {
        match self {
            Axis::IntroversionExtraversion => "BNIEFinal.json",
            Axis::SensingIntuition => "BNSNFinal.json",
            Axis::ThinkingFeeling => "BNTFFinal.json",
            Axis::PerceivingJudging => "BNPJFinal.json",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.positive_letter(), self.negative_letter())
    }
}
