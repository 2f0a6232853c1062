/// Left-to-right cursor over description text.
///
/// Every `take_*` method either consumes what it matched (plus any leading
/// whitespace) or leaves the cursor untouched.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Cursor { rest: text }
    }

    /// The unconsumed remainder of the input
    pub(crate) fn rest(&self) -> &'a str {
        self.rest
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest.len(), |(i, _)| i);
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    fn take_char(&mut self, expected: char) -> bool {
        match self.rest.strip_prefix(expected) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn take_digits(&mut self) -> Option<&'a str> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        (!digits.is_empty()).then_some(digits)
    }

    /// A digit run that is not the numerator of a fraction.
    pub(crate) fn take_whole_number(&mut self) -> Option<&'a str> {
        let mut probe = *self;
        probe.skip_ws();
        let digits = probe.take_digits()?;
        if probe.rest.trim_start().starts_with('/') {
            return None;
        }
        *self = probe;
        Some(digits)
    }

    /// `digits [ws] / [ws] digits`, returned as (numerator, denominator).
    pub(crate) fn take_fraction(&mut self) -> Option<(&'a str, &'a str)> {
        let mut probe = *self;
        probe.skip_ws();
        let numerator = probe.take_digits()?;
        probe.skip_ws();
        if !probe.take_char('/') {
            return None;
        }
        probe.skip_ws();
        let denominator = probe.take_digits()?;
        *self = probe;
        Some((numerator, denominator))
    }

    /// The next run of non-whitespace characters.
    pub(crate) fn take_word(&mut self) -> Option<&'a str> {
        let mut probe = *self;
        probe.skip_ws();
        let word = probe.take_while(|c| !c.is_whitespace());
        if word.is_empty() {
            return None;
        }
        *self = probe;
        Some(word)
    }

    /// Everything up to the next comma or end of input, trimmed.
    pub(crate) fn take_until_comma(&mut self) -> Option<&'a str> {
        let mut probe = *self;
        let field = probe.take_while(|c| c != ',').trim();
        if field.is_empty() {
            return None;
        }
        *self = probe;
        Some(field)
    }

    /// A comma followed by a non-empty run of non-comma characters.
    ///
    /// The run is trimmed afterwards, so a whitespace-only run yields `""`.
    pub(crate) fn take_comma_field(&mut self) -> Option<&'a str> {
        let mut probe = *self;
        probe.skip_ws();
        if !probe.take_char(',') {
            return None;
        }
        let run = probe.take_while(|c| c != ',');
        if run.is_empty() {
            return None;
        }
        *self = probe;
        Some(run.trim())
    }
}
