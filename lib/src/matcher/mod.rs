/*! The backtracking matcher.

The matcher is a depth-first interpreter over a compiled portion
sequence. [`match_here`] decides whether the sequence matches the line
at a fixed starting offset; the searcher tries every starting offset in
turn. Each frame dispatches on the portion at the current position,
consumes the bytes that portion accounts for and recurses on the rest
of the sequence. Success is reaching the end of the sequence; the
return value carries the number of bytes the frame and its tail
consumed, which is what capturing groups store.

Two details do most of the heavy lifting here:

- Capturing groups reserve their capture slot before evaluating their
  subpattern, so slot order stays equal to source order across
  backtracking (see [`captures`]).

- A subpattern's final quantifier sometimes has to coordinate with the
  portion that follows the group one level up. That next-outside
  portion travels down as the `lookahead` argument, letting `c+` give
  back one byte to a same-literal neighbor and letting a negative
  `[^...]+` stop at a literal it would otherwise swallow.
*/

use crate::pattern::Portion;

pub(crate) mod captures;

#[cfg(test)]
mod tests;

use captures::CaptureStore;

/// Attempts to match `portions` against `line` starting at
/// `input_index`, with `portion_index` pointing at the portion to try
/// next. Returns the number of bytes consumed from `input_index` to the
/// end of the successful match, or `None` on a miss.
///
/// `lookahead` is the portion following the enclosing group at the next
/// level up, if any; it is consulted by quantifiers sitting at the end
/// of their subpattern.
#[inline]
pub(crate) fn match_here(
    line: &[u8],
    portions: &[Portion],
    input_index: usize,
    portion_index: usize,
    store: &mut CaptureStore,
    lookahead: Option<&Portion>,
) -> Option<usize> {
    let Some(portion) = portions.get(portion_index) else {
        return Some(0);
    };

    if input_index >= line.len() {
        return portion.allows_empty_tail().then_some(0);
    }

    match portion {
        Portion::StartAnchor => {
            if input_index > 0 {
                return None;
            }
            match_here(
                line,
                portions,
                input_index,
                portion_index + 1,
                store,
                lookahead,
            )
        }

        Portion::OneOrMore(literal) => {
            let mut count =
                run_len(line, input_index, |byte| byte == *literal);
            if count == 0 {
                return None;
            }
            // When the portion right after this one wants the same
            // literal, give one byte back so it can still match. The
            // neighbor can also live one level up, past the end of this
            // subpattern; that is what the lookahead is for.
            let gives_back = match portions.get(portion_index + 1) {
                Some(next) => next.as_literal() == Some(*literal),
                None => {
                    lookahead.and_then(Portion::as_literal) == Some(*literal)
                }
            };
            if gives_back {
                count -= 1;
            }
            let tail = match_here(
                line,
                portions,
                input_index + count,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(count + tail)
        }

        Portion::ZeroOrOne(literal) => {
            let count = run_len(line, input_index, |byte| byte == *literal);
            if count > 1 {
                return None;
            }
            let tail = match_here(
                line,
                portions,
                input_index + count,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(count + tail)
        }

        Portion::DigitLeastOne | Portion::WordLeastOne => {
            let pred: fn(u8) -> bool = match portion {
                Portion::DigitLeastOne => |byte| byte.is_ascii_digit(),
                _ => is_word,
            };
            let count = run_len(line, input_index, pred);
            if count == 0 {
                return None;
            }
            let tail = match_here(
                line,
                portions,
                input_index + count,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(count + tail)
        }

        Portion::DigitMostOne | Portion::WordMostOne => {
            let pred: fn(u8) -> bool = match portion {
                Portion::DigitMostOne => |byte| byte.is_ascii_digit(),
                _ => is_word,
            };
            let count = run_len(line, input_index, pred);
            if count > 1 {
                return None;
            }
            let tail = match_here(
                line,
                portions,
                input_index + count,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(count + tail)
        }

        Portion::CharGroupMostOne(set, positive) => {
            let count = run_len(line, input_index, |byte| {
                set.contains(byte) == *positive
            });
            if count > 1 {
                return None;
            }
            let tail = match_here(
                line,
                portions,
                input_index + count,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(count + tail)
        }

        Portion::CharGroupLeastOne(set, positive) => {
            let count = if *positive {
                run_len(line, input_index, |byte| set.contains(byte))
            } else {
                // A negative run at the end of a subpattern must not
                // swallow the literal the enclosing level expects next.
                let stop = if portion_index + 1 == portions.len() {
                    lookahead.and_then(Portion::as_literal)
                } else {
                    None
                };
                run_len(line, input_index, |byte| {
                    !set.contains(byte) && Some(byte) != stop
                })
            };
            if count == 0 {
                return None;
            }
            let tail = match_here(
                line,
                portions,
                input_index + count,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(count + tail)
        }

        Portion::AnyLeastOne => {
            if let Some(literal) =
                portions.get(portion_index + 1).and_then(Portion::as_literal)
            {
                // Run up to the literal the next portion wants, or to
                // end-of-line when it never shows up.
                let count =
                    run_len(line, input_index, |byte| byte != literal);
                if count == 0 {
                    return None;
                }
                let tail = match_here(
                    line,
                    portions,
                    input_index + count,
                    portion_index + 1,
                    store,
                    lookahead,
                )?;
                Some(count + tail)
            } else {
                // Minimal-step backtracking: accept the smallest
                // advance that lets the remainder match.
                for consumed in 1..=(line.len() - input_index) {
                    if let Some(tail) = match_here(
                        line,
                        portions,
                        input_index + consumed,
                        portion_index + 1,
                        store,
                        lookahead,
                    ) {
                        return Some(consumed + tail);
                    }
                }
                None
            }
        }

        Portion::AnyMostOne => {
            if let Some(tail) = match_here(
                line,
                portions,
                input_index + 1,
                portion_index + 1,
                store,
                lookahead,
            ) {
                return Some(1 + tail);
            }
            match_here(
                line,
                portions,
                input_index,
                portion_index + 1,
                store,
                lookahead,
            )
        }

        Portion::Or(first, second) => {
            // Branch choice is committed: once a side matches, the
            // remainder is not retried against the other side.
            if let Some(consumed) =
                match_here(line, first, input_index, 0, store, None)
            {
                let tail = match_here(
                    line,
                    portions,
                    input_index + consumed,
                    portion_index + 1,
                    store,
                    lookahead,
                )?;
                return Some(consumed + tail);
            }
            let consumed =
                match_here(line, second, input_index, 0, store, None)?;
            let tail = match_here(
                line,
                portions,
                input_index + consumed,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(consumed + tail)
        }

        Portion::Pattern(sub) => {
            let slot = store.reserve_first_free()?;
            let child_lookahead =
                portions.get(portion_index + 1).or(lookahead);
            let consumed = match_here(
                line,
                sub,
                input_index,
                0,
                store,
                child_lookahead,
            )?;
            store.set_text(slot, &line[input_index..input_index + consumed]);
            let tail = match_here(
                line,
                portions,
                input_index + consumed,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(consumed + tail)
        }

        Portion::PatternMostOne(sub) => {
            let slot = store.reserve_first_free()?;
            let child_lookahead =
                portions.get(portion_index + 1).or(lookahead);
            let mut total = 0;
            let mut count = 0;
            while let Some(consumed) = match_here(
                line,
                sub,
                input_index + total,
                0,
                store,
                child_lookahead,
            ) {
                count += 1;
                if count > 1 {
                    return None;
                }
                total += consumed;
                if consumed == 0 {
                    break;
                }
            }
            store.set_text(slot, &line[input_index..input_index + total]);
            let tail = match_here(
                line,
                portions,
                input_index + total,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(total + tail)
        }

        Portion::PatternLeastOne(sub) => {
            let slot = store.reserve_first_free()?;
            let child_lookahead =
                portions.get(portion_index + 1).or(lookahead);
            let mut total = 0;
            let mut count = 0;
            while let Some(consumed) = match_here(
                line,
                sub,
                input_index + total,
                0,
                store,
                child_lookahead,
            ) {
                count += 1;
                total += consumed;
                if consumed == 0 {
                    break;
                }
            }
            if count == 0 {
                return None;
            }
            if total > 0 {
                store.set_text(
                    slot,
                    &line[input_index..input_index + total],
                );
            } else {
                // The repetition succeeded without consuming anything,
                // so the group captured nothing; hand the slot back.
                store.release(slot);
            }
            let tail = match_here(
                line,
                portions,
                input_index + total,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(total + tail)
        }

        Portion::Backreference(ordinal) => {
            let text = store.text(ordinal - 1).to_owned();
            if !line[input_index..].starts_with(&text) {
                return None;
            }
            let tail = match_here(
                line,
                portions,
                input_index + text.len(),
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(text.len() + tail)
        }

        Portion::BackrefLeastOne(ordinal) => {
            let text = store.text(ordinal - 1).to_owned();
            let count = count_copies(line, input_index, &text);
            if !text.is_empty() && count == 0 {
                return None;
            }
            let consumed = count * text.len();
            let tail = match_here(
                line,
                portions,
                input_index + consumed,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(consumed + tail)
        }

        Portion::BackrefMostOne(ordinal) => {
            let text = store.text(ordinal - 1).to_owned();
            let count = count_copies(line, input_index, &text);
            if count > 1 {
                return None;
            }
            let consumed = count * text.len();
            let tail = match_here(
                line,
                portions,
                input_index + consumed,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(consumed + tail)
        }

        Portion::Any
        | Portion::Literal(_)
        | Portion::Digit
        | Portion::Word
        | Portion::CharGroup(..)
        | Portion::EndAnchor => {
            if !match_atom(line[input_index], portion) {
                return None;
            }
            let tail = match_here(
                line,
                portions,
                input_index + 1,
                portion_index + 1,
                store,
                lookahead,
            )?;
            Some(1 + tail)
        }
    }
}

/// Matches one byte against a simple atom. The composite kinds are
/// handled directly in [`match_here`].
fn match_atom(byte: u8, portion: &Portion) -> bool {
    match portion {
        Portion::Any => true,
        Portion::Literal(literal) => byte == *literal,
        Portion::Digit => byte.is_ascii_digit(),
        Portion::Word => is_word(byte),
        Portion::CharGroup(set, positive) => set.contains(byte) == *positive,
        // An end anchor with input still left is a miss; the
        // end-of-line case never reaches here.
        Portion::EndAnchor => false,
        _ => unreachable!("composite portion in match_atom"),
    }
}

/// Length of the run of bytes satisfying `pred`, starting at `start`.
fn run_len(line: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    line[start..].iter().take_while(|&&byte| pred(byte)).count()
}

/// Number of consecutive copies of `text` in `line` at `at`. Zero for an
/// empty `text`, which would otherwise repeat forever.
fn count_copies(line: &[u8], mut at: usize, text: &[u8]) -> usize {
    if text.is_empty() {
        return 0;
    }
    let mut count = 0;
    while line.len() >= at + text.len() && &line[at..at + text.len()] == text
    {
        count += 1;
        at += text.len();
    }
    count
}

/// Word bytes are letters, digits and the underscore.
#[inline]
fn is_word(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric()
}
