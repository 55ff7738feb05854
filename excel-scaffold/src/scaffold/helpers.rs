//! Template helper functions for code generation
//!
//! Naming conventions shared by the schema and controller compilers: model
//! names from table names, relationship method names, route URIs.
//!
//! Inflector's rules match on whole strings and some of them keep only the
//! matched word, so inflection is applied to the last word of a compound
//! name and the leading words are joined back unchanged.

use inflector::Inflector;

/// Template helpers for code generation
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use excel_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_snake_case("UserProfile"), "user_profile");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Convert string to `PascalCase` (Laravel's "studly" case)
    ///
    /// # Examples
    ///
    /// ```
    /// # use excel_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_pascal_case("user_profile"), "UserProfile");
    /// ```
    #[must_use]
    pub fn to_pascal_case(input: &str) -> String {
        input.to_pascal_case()
    }

    /// Convert string to camelCase
    ///
    /// # Examples
    ///
    /// ```
    /// # use excel_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_camel_case("user_profile"), "userProfile");
    /// ```
    #[must_use]
    pub fn to_camel_case(input: &str) -> String {
        input.to_camel_case()
    }

    /// Convert string to kebab-case
    #[must_use]
    pub fn to_kebab_case(input: &str) -> String {
        input.to_kebab_case()
    }

    /// Pluralize a word; already-plural input is returned unchanged
    ///
    /// # Examples
    ///
    /// ```
    /// # use excel_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::pluralize("post"), "posts");
    /// assert_eq!(TemplateHelpers::pluralize("posts"), "posts");
    /// assert_eq!(TemplateHelpers::pluralize("category"), "categories");
    /// ```
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        inflect_last_word(input, |word| word.to_singular().to_plural())
    }

    /// Singularize a word
    ///
    /// # Examples
    ///
    /// ```
    /// # use excel_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::singularize("posts"), "post");
    /// assert_eq!(TemplateHelpers::singularize("categories"), "category");
    /// assert_eq!(TemplateHelpers::singularize("order_statuses"), "order_status");
    /// ```
    #[must_use]
    pub fn singularize(input: &str) -> String {
        inflect_last_word(input, |word| word.to_singular())
    }

    /// Model class name for a table (`StudlyCase` singular)
    ///
    /// # Examples
    ///
    /// ```
    /// # use excel_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_model_name("users"), "User");
    /// assert_eq!(TemplateHelpers::to_model_name("categories"), "Category");
    /// ```
    #[must_use]
    pub fn to_model_name(table: &str) -> String {
        Self::to_pascal_case(&Self::singularize(table))
    }

    /// Method name for a to-one relationship (`camelCase` singular)
    #[must_use]
    pub fn to_singular_method(name: &str) -> String {
        Self::to_camel_case(&Self::singularize(name))
    }

    /// Method name for a to-many relationship (`camelCase` plural)
    #[must_use]
    pub fn to_plural_method(name: &str) -> String {
        Self::to_camel_case(&Self::pluralize(name))
    }

    /// Route-model variable for a model (`$employee`, without the sigil)
    #[must_use]
    pub fn to_variable_name(model: &str) -> String {
        Self::to_camel_case(model)
    }

    /// Default resource URI for a model (kebab-case plural)
    ///
    /// # Examples
    ///
    /// ```
    /// # use excel_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_route_uri("Employee"), "employees");
    /// assert_eq!(TemplateHelpers::to_route_uri("Category"), "categories");
    /// ```
    #[must_use]
    pub fn to_route_uri(model: &str) -> String {
        Self::to_kebab_case(&Self::pluralize(&Self::to_snake_case(model)))
    }
}

/// Byte offset where the last word of `input` starts
///
/// Words are separated by `_`, `-`, spaces, or a lower-to-upper case change.
fn last_word_start(input: &str) -> usize {
    let mut start = 0;
    let mut previous: Option<char> = None;
    for (index, current) in input.char_indices() {
        if matches!(current, '_' | '-' | ' ') {
            start = index + current.len_utf8();
        } else if current.is_uppercase()
            && previous.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
        {
            start = index;
        }
        previous = Some(current);
    }
    start
}

/// Apply `inflect` to the last word only, keeping its leading capital
fn inflect_last_word(input: &str, inflect: impl Fn(&str) -> String) -> String {
    let (head, word) = input.split_at(last_word_start(input));
    if word.is_empty() {
        return input.to_string();
    }

    let inflected = inflect(&word.to_lowercase());
    let mut chars = inflected.chars();
    match chars.next() {
        Some(first) if word.starts_with(char::is_uppercase) => {
            format!("{head}{}{}", first.to_uppercase(), chars.as_str())
        }
        _ => format!("{head}{inflected}"),
    }
}
