//! Typed cheat codes.
//!
//! Typing `/` starts capturing a short command, which is dispatched on enter. The first captured
//! character selects the command and the rest is its argument:
//!
//! - `b<name>`: switch to the named board
//! - `r`: reset the player
//! - `g<number>`: set gravity
//! - `j<number>`: set jump speed
//!
//! Whitespace, escape, or typing more than `MAX_CHEAT_LEN` characters cancels capturing.

/// Character which begins capturing.
pub const CHEAT_PREFIX: char = '/';
/// Maximum number of characters captured after the prefix.
pub const MAX_CHEAT_LEN: usize = 8;


/// Command produced by a dispatched cheat code.
#[derive(Debug, Clone, PartialEq)]
pub enum CheatCommand {
    /// Switch to the board with this name. Unknown names are resolved when applied.
    SwitchBoard(String),
    Reset,
    SetGravity(f32),
    SetJumpSpeed(f32),
}

/// Key press relevant to cheat code entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CheatKey {
    Char(char),
    Backspace,
    Enter,
    Escape,
}

/// Why capturing stopped without dispatching.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CancelReason {
    Escape,
    Whitespace,
    Overflow,
    Empty,
    /// The captured text was not a recognized command.
    Unrecognized,
}

/// Result of feeding a key to the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum CheatOutcome {
    /// The parser is idle and the key is not for it.
    Ignored,
    /// The key was consumed and the parser is (still) capturing.
    Capturing,
    Dispatched(CheatCommand),
    Cancelled(CancelReason),
}

/// Cheat code entry state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CheatCodeParser {
    #[default]
    Idle,
    Capturing(String),
}

impl CheatCodeParser {
    pub fn is_capturing(&self) -> bool {
        matches!(self, CheatCodeParser::Capturing(_))
    }

    /// Text captured so far, if capturing.
    pub fn buffer(&self) -> Option<&str> {
        match self {
            CheatCodeParser::Idle => None,
            CheatCodeParser::Capturing(buffer) => Some(buffer),
        }
    }

    pub fn on_key(&mut self, key: CheatKey) -> CheatOutcome {
        let buffer = match self {
            CheatCodeParser::Idle => {
                return if key == CheatKey::Char(CHEAT_PREFIX) {
                    *self = CheatCodeParser::Capturing(String::new());
                    CheatOutcome::Capturing
                } else {
                    CheatOutcome::Ignored
                };
            }
            CheatCodeParser::Capturing(buffer) => buffer,
        };

        match key {
            CheatKey::Char(c) if c.is_whitespace() => self.cancel(CancelReason::Whitespace),
            CheatKey::Char(c) if c.is_control() => CheatOutcome::Capturing,
            CheatKey::Char(c) => {
                if buffer.chars().count() >= MAX_CHEAT_LEN {
                    self.cancel(CancelReason::Overflow)
                } else {
                    buffer.push(c);
                    CheatOutcome::Capturing
                }
            }
            CheatKey::Backspace => {
                buffer.pop();
                CheatOutcome::Capturing
            }
            CheatKey::Escape => self.cancel(CancelReason::Escape),
            CheatKey::Enter => {
                let buffer = std::mem::take(buffer);
                *self = CheatCodeParser::Idle;
                if buffer.is_empty() {
                    debug!("empty cheat code");
                    return CheatOutcome::Cancelled(CancelReason::Empty);
                }
                match parse_command(&buffer) {
                    Some(command) => {
                        info!(?command, "cheat code dispatched");
                        CheatOutcome::Dispatched(command)
                    }
                    None => {
                        warn!(%buffer, "unrecognized cheat code");
                        CheatOutcome::Cancelled(CancelReason::Unrecognized)
                    }
                }
            }
        }
    }

    fn cancel(&mut self, reason: CancelReason) -> CheatOutcome {
        debug!(?reason, "cheat code cancelled");
        *self = CheatCodeParser::Idle;
        CheatOutcome::Cancelled(reason)
    }
}

fn parse_command(text: &str) -> Option<CheatCommand> {
    let mut chars = text.chars();
    let command = chars.next()?.to_ascii_lowercase();
    let arg = chars.as_str();
    match command {
        'b' if !arg.is_empty() => Some(CheatCommand::SwitchBoard(arg.to_owned())),
        'r' if arg.is_empty() => Some(CheatCommand::Reset),
        'g' => arg.parse::<u32>().ok().map(|n| CheatCommand::SetGravity(n as f32)),
        'j' => arg.parse::<u32>().ok().map(|n| CheatCommand::SetJumpSpeed(n as f32)),
        _ => None,
    }
}


#[cfg(test)]
fn type_str(parser: &mut CheatCodeParser, s: &str) -> Vec<CheatOutcome> {
    s.chars().map(|c| parser.on_key(CheatKey::Char(c))).collect()
}

#[test]
fn test_idle_ignores_other_keys() {
    let mut parser = CheatCodeParser::default();
    assert_eq!(parser.on_key(CheatKey::Char('b')), CheatOutcome::Ignored);
    assert_eq!(parser.on_key(CheatKey::Enter), CheatOutcome::Ignored);
    assert_eq!(parser.on_key(CheatKey::Escape), CheatOutcome::Ignored);
    assert!(!parser.is_capturing());
}

#[test]
fn test_dispatch_board_switch() {
    let mut parser = CheatCodeParser::default();
    type_str(&mut parser, "/bvault");
    assert_eq!(parser.buffer(), Some("bvault"));
    assert_eq!(
        parser.on_key(CheatKey::Enter),
        CheatOutcome::Dispatched(CheatCommand::SwitchBoard("vault".to_owned())),
    );
    assert_eq!(parser, CheatCodeParser::Idle);
}

#[test]
fn test_dispatch_tuning_and_reset() {
    let mut parser = CheatCodeParser::default();
    type_str(&mut parser, "/g2500");
    assert_eq!(parser.on_key(CheatKey::Enter), CheatOutcome::Dispatched(CheatCommand::SetGravity(2500.0)));
    type_str(&mut parser, "/j900");
    assert_eq!(parser.on_key(CheatKey::Enter), CheatOutcome::Dispatched(CheatCommand::SetJumpSpeed(900.0)));
    type_str(&mut parser, "/R");
    assert_eq!(parser.on_key(CheatKey::Enter), CheatOutcome::Dispatched(CheatCommand::Reset));
}

#[test]
fn test_cancel_conditions() {
    let mut parser = CheatCodeParser::default();
    type_str(&mut parser, "/b");
    assert_eq!(parser.on_key(CheatKey::Char(' ')), CheatOutcome::Cancelled(CancelReason::Whitespace));
    assert!(!parser.is_capturing());

    type_str(&mut parser, "/b");
    assert_eq!(parser.on_key(CheatKey::Escape), CheatOutcome::Cancelled(CancelReason::Escape));

    let outcomes = type_str(&mut parser, "/123456789");
    assert_eq!(outcomes[outcomes.len() - 1], CheatOutcome::Cancelled(CancelReason::Overflow));
    assert!(outcomes[..outcomes.len() - 1].iter().all(|o| *o == CheatOutcome::Capturing));
    assert!(!parser.is_capturing());

    type_str(&mut parser, "/");
    assert_eq!(parser.on_key(CheatKey::Enter), CheatOutcome::Cancelled(CancelReason::Empty));
}

#[test]
fn test_unrecognized_commands_rejected() {
    for code in ["/x", "/gfast", "/j-5", "/b", "/rr"] {
        let mut parser = CheatCodeParser::default();
        type_str(&mut parser, code);
        assert_eq!(
            parser.on_key(CheatKey::Enter),
            CheatOutcome::Cancelled(CancelReason::Unrecognized),
            "{}",
            code,
        );
        assert!(!parser.is_capturing());
    }
}

#[test]
fn test_backspace_edits_buffer() {
    let mut parser = CheatCodeParser::default();
    type_str(&mut parser, "/bx");
    parser.on_key(CheatKey::Backspace);
    type_str(&mut parser, "annex");
    assert_eq!(
        parser.on_key(CheatKey::Enter),
        CheatOutcome::Dispatched(CheatCommand::SwitchBoard("annex".to_owned())),
    );
}
