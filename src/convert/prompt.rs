use crate::schema::Schema;

/// Build the model input for a question: the question followed by a compact
/// one-line summary of every table, `" | "` separated.
///
/// Format: `<question> | table_a ( col1, col2 ) | table_b ( col1 )`.
/// The text is passed through verbatim, with no escaping.
pub fn build(question: &str, schema: &Schema) -> String {
    let table_info: Vec<String> = schema
        .table_names()
        .iter()
        .map(|table| format!("{} ( {} )", table, schema.columns(table).join(", ")))
        .collect();

    format!("{} | {}", question, table_info.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_starts_with_question_and_separator() {
        let schema = Schema::default_ecommerce();
        let prompt = build("Show me all customers", &schema);
        assert!(prompt.starts_with("Show me all customers | "));
    }

    #[test]
    fn prompt_ends_with_full_table_list() {
        let schema = Schema::default_ecommerce();
        let prompt = build("anything", &schema);

        assert!(prompt.contains(
            "customers ( customer_id, name, email, city, country, created_at )"
        ));
        assert!(prompt.ends_with(
            "order_items ( item_id, order_id, product_id, quantity, price )"
        ));
    }

    #[test]
    fn prompt_is_deterministic() {
        let schema = Schema::default_ecommerce();
        assert_eq!(build("same question", &schema), build("same question", &schema));
    }
}
