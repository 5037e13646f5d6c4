mod article_helpers;

pub use article_helpers::*;

/// Assembles `column = ?` fragments for the values that are present, keeping
/// the bind parameters in the same order.
struct QueryBuilder {
    query: String,
    params: Vec<String>,
    separator: Option<&'static str>,
    counter: usize,
}

impl QueryBuilder {
    fn new(initial: String, separator: Option<&'static str>) -> Self {
        Self {
            query: initial,
            params: vec![],
            separator,
            counter: 0,
        }
    }

    fn add_param(mut self, column: &'static str, param: Option<String>) -> Self {
        if let Some(value) = param {
            let filter = format!("{} = ?", column);
            self.query.push_str(&filter);
            if let Some(separator) = self.separator {
                self.query.push_str(separator);
            }
            self.params.push(value);
            self.counter += 1;
        }
        self
    }

    fn trim(mut self) -> Self {
        if let Some(separator) = self.separator {
            self.query = self.query.trim_end_matches(separator).to_string();
        }
        self
    }

    /// Returns an empty query when no parameter was added.
    fn build(mut self) -> (String, Vec<String>) {
        self = self.trim();
        if self.counter == 0 {
            self.query = String::new();
        }
        (self.query, self.params)
    }
}
