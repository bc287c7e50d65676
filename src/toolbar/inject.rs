//! Text injection back into the captured source.
//!
//! Offset targets get a full-value splice with the cursor placed after the
//! inserted text; range targets restore the cloned range and edit there.
//! Either the whole mutation applies or nothing does.

use crate::error::InjectionError;
use crate::host::Host;
use crate::toolbar::source::SourceSnapshot;

/// Write `text` into the surface the snapshot was captured from.
///
/// `replace` swaps the captured span for `text`; otherwise `text` is
/// inserted at the span's end boundary. Offsets recorded at capture time
/// are validated against the field's *current* value: a replace span that
/// no longer fits fails with [`InjectionError::InjectionFailed`], an
/// insert point clamps to the current length.
pub fn inject<H: Host>(
    host: &mut H,
    snapshot: &SourceSnapshot<H>,
    text: &str,
    replace: bool,
) -> Result<(), InjectionError> {
    match snapshot {
        SourceSnapshot::None => Err(InjectionError::NoEditableTarget),
        _ if text.is_empty() => Err(InjectionError::EmptyPayload),
        SourceSnapshot::Offset {
            element,
            start,
            end,
        } => inject_offsets(host, element, *start, *end, text, replace),
        SourceSnapshot::Range { element, range } => {
            let ok = if replace {
                host.replace_range(element, range, text)
            } else {
                host.insert_at_range_end(element, range, text)
            };
            if !ok {
                return Err(InjectionError::InjectionFailed);
            }
            host.fire_input(element);
            Ok(())
        }
    }
}

fn inject_offsets<H: Host>(
    host: &mut H,
    element: &H::Node,
    start: usize,
    end: usize,
    text: &str,
    replace: bool,
) -> Result<(), InjectionError> {
    let value = host
        .field_text(element)
        .ok_or(InjectionError::InjectionFailed)?;

    let (new_value, cursor) = if replace {
        // The captured span must still fit the current value; the field
        // may have been edited between capture and injection.
        if end > value.len() {
            return Err(InjectionError::InjectionFailed);
        }
        let head = value.get(..start).ok_or(InjectionError::InjectionFailed)?;
        let tail = value.get(end..).ok_or(InjectionError::InjectionFailed)?;
        (format!("{head}{text}{tail}"), start + text.len())
    } else {
        let at = end.min(value.len());
        let head = value.get(..at).ok_or(InjectionError::InjectionFailed)?;
        let tail = value.get(at..).ok_or(InjectionError::InjectionFailed)?;
        (format!("{head}{text}{tail}"), at + text.len())
    };

    if !host.commit_field(element, &new_value, cursor) {
        return Err(InjectionError::InjectionFailed);
    }
    host.fire_input(element);
    Ok(())
}
