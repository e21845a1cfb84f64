//! Display command definitions and the batching queue.
//!
//! Every primitive the firmware understands is one [`Command`] with a fixed
//! numeric id. The HTTP batch handler reads short argument keys, the serial
//! handler reads long ones:
//!
//! | id | command        | batch args    | serial args                |
//! |----|----------------|---------------|----------------------------|
//! | 0  | println        | `t`           | `text`                     |
//! | 1  | set_text_size  | `s`           | `size`                     |
//! | 2  | set_cursor     | `x`, `y`      | `x`, `y`                   |
//! | 3  | set_text_wrap  | `w`           | `wrap`                     |
//! | 4  | set_text_color | `c`, opt. `b` | `color`, opt. `background` |
//! | 5  | fill_screen    | `c`           | `color`                    |
//! | 6  | set_rotation   | `o`           | `orientation`              |

use crate::rotation::Rotation;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// A single display primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print a line at the cursor and advance it.
    Println { text: String },
    /// Set the text scale multiplier.
    SetTextSize { size: u8 },
    /// Move the cursor to device pixel coordinates.
    SetCursor { x: i16, y: i16 },
    /// Enable or disable automatic line wrap.
    SetTextWrap { wrap: bool },
    /// Set the text foreground and, optionally, background color.
    SetTextColor { color: u16, background: Option<u16> },
    /// Fill the whole screen with one color.
    FillScreen { color: u16 },
    /// Rotate the display.
    SetRotation { rotation: Rotation },
}

impl Command {
    /// Returns the firmware command id.
    pub fn id(&self) -> u8 {
        match self {
            Command::Println { .. } => 0,
            Command::SetTextSize { .. } => 1,
            Command::SetCursor { .. } => 2,
            Command::SetTextWrap { .. } => 3,
            Command::SetTextColor { .. } => 4,
            Command::FillScreen { .. } => 5,
            Command::SetRotation { .. } => 6,
        }
    }

    /// Returns the command name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Println { .. } => "println",
            Command::SetTextSize { .. } => "set_text_size",
            Command::SetCursor { .. } => "set_cursor",
            Command::SetTextWrap { .. } => "set_text_wrap",
            Command::SetTextColor { .. } => "set_text_color",
            Command::FillScreen { .. } => "fill_screen",
            Command::SetRotation { .. } => "set_rotation",
        }
    }

    /// Builds the short-key argument object used in HTTP batches.
    pub fn args(&self) -> Map<String, Value> {
        let value = match self {
            Command::Println { text } => json!({ "t": text }),
            Command::SetTextSize { size } => json!({ "s": size }),
            Command::SetCursor { x, y } => json!({ "x": x, "y": y }),
            Command::SetTextWrap { wrap } => json!({ "w": wrap }),
            Command::SetTextColor {
                color,
                background: Some(background),
            } => json!({ "c": color, "b": background }),
            Command::SetTextColor {
                color,
                background: None,
            } => json!({ "c": color }),
            Command::FillScreen { color } => json!({ "c": color }),
            Command::SetRotation { rotation } => json!({ "o": rotation.code() }),
        };
        into_map(value)
    }

    /// Builds the long-key argument object used in serial frames.
    pub fn serial_args(&self) -> Map<String, Value> {
        let value = match self {
            Command::Println { text } => json!({ "text": text }),
            Command::SetTextSize { size } => json!({ "size": size }),
            Command::SetCursor { x, y } => json!({ "x": x, "y": y }),
            Command::SetTextWrap { wrap } => json!({ "wrap": wrap }),
            Command::SetTextColor {
                color,
                background: Some(background),
            } => json!({ "color": color, "background": background }),
            Command::SetTextColor {
                color,
                background: None,
            } => json!({ "color": color }),
            Command::FillScreen { color } => json!({ "color": color }),
            Command::SetRotation { rotation } => json!({ "orientation": rotation.code() }),
        };
        into_map(value)
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// One entry of an HTTP batch.
#[derive(Serialize)]
struct BatchEntry {
    cmd: u8,
    args: Map<String, Value>,
}

/// The HTTP batch document.
#[derive(Serialize)]
struct Batch {
    cmds: Vec<BatchEntry>,
}

/// Ordered queue of commands awaiting a flush.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn println(&mut self, text: impl Into<String>) {
        self.push(Command::Println { text: text.into() });
    }

    pub fn set_text_size(&mut self, size: u8) {
        self.push(Command::SetTextSize { size });
    }

    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.push(Command::SetCursor { x, y });
    }

    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.push(Command::SetTextWrap { wrap });
    }

    pub fn set_text_color(&mut self, color: u16, background: Option<u16>) {
        self.push(Command::SetTextColor { color, background });
    }

    pub fn fill_screen(&mut self, color: u16) {
        self.push(Command::FillScreen { color });
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.push(Command::SetRotation { rotation });
    }

    /// Number of queued commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates over queued commands in enqueue order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Drops all queued commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Removes and returns the whole batch, leaving the queue empty.
    pub fn take(&mut self) -> CommandQueue {
        std::mem::take(self)
    }

    /// Renders the queue as `{"cmds": [{"cmd": id, "args": {...}}, ...]}`.
    pub fn to_batch_json(&self) -> serde_json::Result<String> {
        let batch = Batch {
            cmds: self
                .commands
                .iter()
                .map(|command| BatchEntry {
                    cmd: command.id(),
                    args: command.args(),
                })
                .collect(),
        };
        serde_json::to_string(&batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_ids() {
        let commands = [
            Command::Println { text: "hi".into() },
            Command::SetTextSize { size: 2 },
            Command::SetCursor { x: 5, y: 27 },
            Command::SetTextWrap { wrap: true },
            Command::SetTextColor {
                color: 0xFFFF,
                background: None,
            },
            Command::FillScreen { color: 0 },
            Command::SetRotation {
                rotation: Rotation::Deg270,
            },
        ];
        let ids: Vec<u8> = commands.iter().map(Command::id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_args_schema() {
        let args = Command::SetCursor { x: 5, y: 60 }.args();
        assert_eq!(Value::Object(args), json!({ "x": 5, "y": 60 }));

        let args = Command::SetRotation {
            rotation: Rotation::Deg270,
        }
        .args();
        assert_eq!(Value::Object(args), json!({ "o": 3 }));

        let args = Command::Println {
            text: "Weather: Clear +12C".into(),
        }
        .args();
        assert_eq!(Value::Object(args), json!({ "t": "Weather: Clear +12C" }));
    }

    #[test]
    fn test_background_omitted_when_absent() {
        let args = Command::SetTextColor {
            color: 0xF800,
            background: None,
        }
        .args();
        assert!(!args.contains_key("b"));
        assert_eq!(args["c"], json!(0xF800));

        let args = Command::SetTextColor {
            color: 0xF800,
            background: Some(0x07E0),
        }
        .args();
        assert_eq!(args["b"], json!(0x07E0));
    }

    #[test]
    fn test_serial_args_use_long_keys() {
        let args = Command::Println {
            text: "hello".into(),
        }
        .serial_args();
        assert_eq!(Value::Object(args), json!({ "text": "hello" }));

        let args = Command::FillScreen { color: 0xF800 }.serial_args();
        assert_eq!(Value::Object(args), json!({ "color": 0xF800 }));

        let args = Command::SetTextColor {
            color: 0xFFFF,
            background: Some(0x1947),
        }
        .serial_args();
        assert_eq!(
            Value::Object(args),
            json!({ "color": 0xFFFF, "background": 0x1947 })
        );

        let args = Command::SetTextColor {
            color: 0xFFFF,
            background: None,
        }
        .serial_args();
        assert!(!args.contains_key("background"));

        let args = Command::SetTextSize { size: 2 }.serial_args();
        assert_eq!(Value::Object(args), json!({ "size": 2 }));

        let args = Command::SetTextWrap { wrap: false }.serial_args();
        assert_eq!(Value::Object(args), json!({ "wrap": false }));

        let args = Command::SetCursor { x: 5, y: 60 }.serial_args();
        assert_eq!(Value::Object(args), json!({ "x": 5, "y": 60 }));

        let args = Command::SetRotation {
            rotation: Rotation::Deg90,
        }
        .serial_args();
        assert_eq!(Value::Object(args), json!({ "orientation": 1 }));
    }

    #[test]
    fn test_queue_preserves_order() {
        let mut queue = CommandQueue::new();
        queue.set_rotation(Rotation::Deg90);
        queue.set_cursor(0, 0);
        queue.fill_screen(0xF800);
        queue.println("0");
        queue.set_text_wrap(false);

        let ids: Vec<u8> = queue.iter().map(Command::id).collect();
        assert_eq!(ids, vec![6, 2, 5, 0, 3]);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn test_batch_json() {
        let mut queue = CommandQueue::new();
        queue.set_text_size(4);
        queue.println("12:00:00 PM");

        let value: Value = serde_json::from_str(&queue.to_batch_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "cmds": [
                    { "cmd": 1, "args": { "s": 4 } },
                    { "cmd": 0, "args": { "t": "12:00:00 PM" } },
                ]
            })
        );
    }

    #[test]
    fn test_empty_batch_json() {
        let queue = CommandQueue::new();
        assert_eq!(queue.to_batch_json().unwrap(), r#"{"cmds":[]}"#);
    }

    #[test]
    fn test_take_empties_queue() {
        let mut queue = CommandQueue::new();
        queue.println("a");
        queue.println("b");

        let batch = queue.take();
        assert_eq!(batch.len(), 2);
        assert!(queue.is_empty());
    }
}
