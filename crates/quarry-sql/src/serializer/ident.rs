use super::{Formatter, Params, ToSql};

/// Double-quoted identifier.
pub(super) struct Ident<S>(pub(super) S);

/// Single-quoted string literal. Only used for names chosen by the request
/// shape, such as JSON object keys; values are always bound.
pub(super) struct Literal<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        quote(f.dst, self.0.as_ref(), '"');
    }
}

impl<S: AsRef<str>> ToSql for Literal<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        quote(f.dst, self.0.as_ref(), '\'');
    }
}

fn quote(dst: &mut String, s: &str, quote: char) {
    dst.push(quote);
    for ch in s.chars() {
        if ch == quote {
            dst.push(quote);
        }
        dst.push(ch);
    }
    dst.push(quote);
}
