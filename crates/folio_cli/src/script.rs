//! Interaction scripts for `folio simulate`
//!
//! A script is a comma-separated list of steps:
//!
//! | Step         | Meaning                                 |
//! |--------------|-----------------------------------------|
//! | `enter`      | pointer enters the book                 |
//! | `leave`      | pointer leaves the book                 |
//! | `move:X`     | pointer moves to `X` (book-local px)    |
//! | `down:X`     | pointer pressed at `X`                  |
//! | `up`         | pointer released                        |
//! | `focus`      | keyboard focus gained                   |
//! | `blur`       | keyboard focus lost                     |
//! | `key:enter`  | key pressed (`enter`, `space`, other)   |
//! | `keyup:KEY`  | key released                            |
//! | `wait:MS`    | advance the clock                       |

use anyhow::{anyhow, bail, Context, Result};
use folio_book::{BookEvent, Key};

/// One parsed script step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Event(BookEvent),
    Wait(f32),
}

/// Parse a whole script; `y` is the pointer row used for positional steps
pub fn parse_script(script: &str, y: f32) -> Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, step)| parse_step(step, y).with_context(|| format!("step {} '{step}'", i + 1)))
        .collect()
}

fn parse_step(step: &str, y: f32) -> Result<Step> {
    let (name, arg) = match step.split_once(':') {
        Some((name, arg)) => (name.trim(), Some(arg.trim())),
        None => (step, None),
    };
    let name = name.to_ascii_lowercase();

    let event = match (name.as_str(), arg) {
        ("wait", Some(ms)) => {
            let ms = number(ms)?;
            if ms < 0.0 {
                bail!("wait must not be negative");
            }
            return Ok(Step::Wait(ms));
        }
        ("enter", None) => BookEvent::PointerEnter,
        ("leave", None) => BookEvent::PointerLeave,
        ("up", None) => BookEvent::PointerUp,
        ("focus", None) => BookEvent::Focus,
        ("blur", None) => BookEvent::Blur,
        ("move", Some(x)) => BookEvent::PointerMove { x: number(x)?, y },
        ("down", Some(x)) => BookEvent::PointerDown { x: number(x)?, y },
        ("key", Some(key)) => BookEvent::KeyDown(parse_key(key)),
        ("keyup", Some(key)) => BookEvent::KeyUp(parse_key(key)),
        (name, None) if matches!(name, "wait" | "move" | "down" | "key" | "keyup") => {
            bail!("'{name}' needs an argument")
        }
        (name, _) => bail!("unknown step '{name}'"),
    };
    Ok(Step::Event(event))
}

fn number(s: &str) -> Result<f32> {
    let value: f32 = s.parse().map_err(|_| anyhow!("'{s}' is not a number"))?;
    if !value.is_finite() {
        bail!("'{s}' is not a finite number");
    }
    Ok(value)
}

fn parse_key(key: &str) -> Key {
    match key.to_ascii_lowercase().as_str() {
        "enter" => Key::Enter,
        "space" => Key::Space,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_hover_script() {
        let steps = parse_script("enter, wait:100,leave,wait:200", 134.0).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Event(BookEvent::PointerEnter),
                Step::Wait(100.0),
                Step::Event(BookEvent::PointerLeave),
                Step::Wait(200.0),
            ]
        );
    }

    #[test]
    fn test_parses_pointer_and_keys() {
        let steps = parse_script("down:20,move:40.5,up,key:Space,keyup:x", 10.0).unwrap();
        assert_eq!(steps[0], Step::Event(BookEvent::PointerDown { x: 20.0, y: 10.0 }));
        assert_eq!(steps[1], Step::Event(BookEvent::PointerMove { x: 40.5, y: 10.0 }));
        assert_eq!(steps[3], Step::Event(BookEvent::KeyDown(Key::Space)));
        assert_eq!(steps[4], Step::Event(BookEvent::KeyUp(Key::Other)));
    }

    #[test]
    fn test_rejects_bad_steps() {
        let err = parse_script("enter,jump", 0.0).unwrap_err();
        assert!(format!("{err:#}").contains("step 2 'jump'"));
        assert!(parse_script("wait:-5", 0.0).is_err());
        assert!(parse_script("wait:abc", 0.0).is_err());
        assert!(parse_script("move", 0.0).is_err());
        assert!(parse_script("", 0.0).unwrap().is_empty());
    }
}
