use crate::api::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    City,
    Mood,
}

/// Raw text of the two form fields. Validation happens in the controller.
#[derive(Debug, Default)]
pub struct InputCollector {
    city: String,
    mood: String,
    focus: Field,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_city(&mut self, text: impl Into<String>) {
        self.city = text.into();
    }

    pub fn set_mood(&mut self, text: impl Into<String>) {
        self.mood = text.into();
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    pub fn current_query(&self) -> Query {
        Query::new(self.city.clone(), self.mood.clone())
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Field::City => Field::Mood,
            Field::Mood => Field::City,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::City => &mut self.city,
            Field::Mood => &mut self.mood,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    pub fn clear_focused(&mut self) {
        self.focused_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_query_keeps_raw_text() {
        let mut input = InputCollector::new();
        input.set_city("  Kraków ");
        input.set_mood("sleepy");
        assert_eq!(input.current_query(), Query::new("  Kraków ", "sleepy"));
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut input = InputCollector::new();
        for c in "Rome".chars() {
            input.push_char(c);
        }
        input.focus_next();
        for c in "joy!".chars() {
            input.push_char(c);
        }
        input.pop_char();

        assert_eq!(input.city(), "Rome");
        assert_eq!(input.mood(), "joy");
        assert_eq!(input.focus(), Field::Mood);

        input.clear_focused();
        assert_eq!(input.mood(), "");
        assert_eq!(input.city(), "Rome");

        input.focus_next();
        assert_eq!(input.focus(), Field::City);
    }
}
