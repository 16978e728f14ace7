//! Just enough HTML reading and escaping for editor markup.
//!
//! The tokenizer is tolerant: unknown constructs degrade to text or are
//! skipped, never rejected, because seeded content may come from any
//! earlier editor version.

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    End {
        name: String,
    },
    Text(String),
}

impl Token {
    pub fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
        attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub(crate) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Value of one property in an inline `style` attribute.
pub(crate) fn style_property(style: &str, property: &str) -> Option<String> {
    style.split(';').find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case(property)
            .then(|| value.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

pub(crate) fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |i| &after[i + 3..]);
            continue;
        }

        if rest.starts_with('<') {
            match parse_tag(rest) {
                Some((token, consumed)) => {
                    if let Some(token) = token {
                        out.push(token);
                    }
                    rest = &rest[consumed..];
                }
                None => {
                    push_text(&mut out, "<");
                    rest = &rest[1..];
                }
            }
            continue;
        }

        let end = rest.find('<').unwrap_or(rest.len());
        push_text(&mut out, &decode_entities(&rest[..end]));
        rest = &rest[end..];
    }

    out
}

fn push_text(out: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Text(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(Token::Text(text.to_string()));
    }
}

/// Parses the tag at the start of `s`. `None` means `<` does not open a tag.
fn parse_tag(s: &str) -> Option<(Option<Token>, usize)> {
    let bytes = s.as_bytes();
    let mut i = 1;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => break,
            None => {}
        }
        i += 1;
    }
    if i >= bytes.len() {
        return None;
    }

    let consumed = i + 1;
    let inner = s[1..i].trim();

    if inner.starts_with('!') || inner.starts_with('?') {
        return Some((None, consumed));
    }

    if let Some(name) = inner.strip_prefix('/') {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            return None;
        }
        return Some((Some(Token::End { name }), consumed));
    }

    if !inner.chars().next()?.is_ascii_alphabetic() {
        return None;
    }

    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(body) => (body.trim_end(), true),
        None => (inner, false),
    };

    let name_end = inner
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(inner.len());
    let name = inner[..name_end].to_ascii_lowercase();
    let attrs = parse_attrs(&inner[name_end..]);

    Some((
        Some(Token::Start {
            name,
            attrs,
            self_closing,
        }),
        consumed,
    ))
}

fn parse_attrs(mut s: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();

    loop {
        s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if s.is_empty() {
            break;
        }

        let name_end = s
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(s.len());
        let name = s[..name_end].to_ascii_lowercase();
        s = s[name_end..].trim_start();

        let value = if let Some(after_eq) = s.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, rest) = match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    match body.find(q) {
                        Some(j) => (&body[..j], &body[j + 1..]),
                        None => (body, ""),
                    }
                }
                _ => {
                    let j = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    (&after_eq[..j], &after_eq[j..])
                }
            };
            s = rest;
            decode_entities(value)
        } else {
            String::new()
        };

        if !name.is_empty() {
            attrs.push((name, value));
        }
    }

    attrs
}

pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(name: &str, attrs: &[(&str, &str)]) -> Token {
        Token::Start {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            self_closing: false,
        }
    }

    #[test]
    fn tokenizes_tags_attributes_and_text() {
        let tokens = tokenize(r#"<DIV style="text-align: center;">a &amp; b<br/></div>"#);
        assert_eq!(
            tokens,
            vec![
                start("div", &[("style", "text-align: center;")]),
                Token::Text("a & b".to_string()),
                Token::Start {
                    name: "br".to_string(),
                    attrs: vec![],
                    self_closing: true,
                },
                Token::End {
                    name: "div".to_string()
                },
            ]
        );
    }

    #[test]
    fn quoted_gt_does_not_end_the_tag() {
        let tokens = tokenize(r#"<a href='x>y' title=plain>t</a>"#);
        assert_eq!(
            tokens[0],
            start("a", &[("href", "x>y"), ("title", "plain")])
        );
    }

    #[test]
    fn stray_angle_brackets_and_comments() {
        let tokens = tokenize("1 < 2 <!-- note --> ok");
        assert_eq!(tokens, vec![Token::Text("1 < 2  ok".to_string())]);
    }

    #[test]
    fn entities_and_escaping() {
        assert_eq!(decode_entities("&lt;b&gt; &#65;&#x42; &bogus; &"), "<b> AB &bogus; &");
        assert_eq!(escape_text("<a & b>"), "&lt;a &amp; b&gt;");
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn reads_style_properties() {
        let style = "color: red; Background-Color : #ff0 ;";
        assert_eq!(style_property(style, "background-color").as_deref(), Some("#ff0"));
        assert_eq!(style_property(style, "color").as_deref(), Some("red"));
        assert_eq!(style_property(style, "font-size"), None);
    }
}
