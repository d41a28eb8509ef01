//! Rule-based fallback used when no model is available. A fixed decision
//! list over the lowercased question, first match wins. This is a closed
//! table of literal templates, not a general pattern engine.

const CUSTOMERS_ORDERED_IN_JANUARY: &str = "SELECT DISTINCT c.* FROM customers c JOIN orders o ON c.customer_id = o.customer_id WHERE MONTH(o.order_date) = 1";
const ALL_CUSTOMERS: &str = "SELECT * FROM customers";
const TOP_PRODUCTS_BY_PRICE: &str = "SELECT * FROM products ORDER BY price DESC LIMIT 5";
const TOP_PRODUCTS: &str = "SELECT * FROM products LIMIT 5";
const PENDING_ORDERS_WITH_CUSTOMERS: &str = "SELECT o.*, c.name FROM orders o JOIN customers c ON o.customer_id = c.customer_id WHERE o.status = 'pending'";
const PENDING_ORDERS: &str = "SELECT * FROM orders WHERE status = 'pending'";
const SALES_BY_CATEGORY: &str = "SELECT p.category, SUM(oi.price * oi.quantity) as total_sales FROM products p JOIN order_items oi ON p.product_id = oi.product_id GROUP BY p.category";
const NEW_YORK_HIGH_VALUE: &str = "SELECT DISTINCT c.* FROM customers c JOIN orders o ON c.customer_id = o.customer_id WHERE c.city = 'New York' AND o.total_amount > 1000";
const GENERIC: &str = "SELECT * FROM customers LIMIT 10";

/// Map a natural-language question to one of the fixed SQL templates.
/// Pure function of the lowercased question text.
pub fn rule_based(question: &str) -> String {
    let q = question.to_lowercase();

    let sql = if q.contains("all customers") || q.contains("show customers") {
        if q.contains("january") {
            CUSTOMERS_ORDERED_IN_JANUARY
        } else {
            ALL_CUSTOMERS
        }
    } else if q.contains("top") && q.contains("products") {
        if q.contains("price") {
            TOP_PRODUCTS_BY_PRICE
        } else {
            TOP_PRODUCTS
        }
    } else if q.contains("pending orders") {
        if q.contains("customer") {
            PENDING_ORDERS_WITH_CUSTOMERS
        } else {
            PENDING_ORDERS
        }
    } else if q.contains("total sales") && q.contains("category") {
        SALES_BY_CATEGORY
    } else if q.contains("new york") && q.contains("1000") {
        NEW_YORK_HIGH_VALUE
    } else {
        GENERIC
    };

    sql.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_all_customers() {
        assert_eq!(rule_based("Show me all customers"), ALL_CUSTOMERS);
    }

    #[test]
    fn customers_in_january_takes_join_variant() {
        assert_eq!(
            rule_based("Show all customers who ordered in January"),
            CUSTOMERS_ORDERED_IN_JANUARY
        );
    }

    #[test]
    fn top_products_by_price() {
        assert_eq!(
            rule_based("Find top 5 products by price"),
            TOP_PRODUCTS_BY_PRICE
        );
    }

    #[test]
    fn top_products_without_price() {
        assert_eq!(rule_based("List the top products"), TOP_PRODUCTS);
    }

    #[test]
    fn pending_orders_with_and_without_customer() {
        assert_eq!(
            rule_based("List all pending orders with customer names"),
            PENDING_ORDERS_WITH_CUSTOMERS
        );
        assert_eq!(rule_based("Get pending orders"), PENDING_ORDERS);
    }

    #[test]
    fn total_sales_by_category() {
        assert_eq!(
            rule_based("Show total sales by product category"),
            SALES_BY_CATEGORY
        );
    }

    #[test]
    fn new_york_high_value_customers() {
        assert_eq!(
            rule_based("Find customers from New York with orders over $1000"),
            NEW_YORK_HIGH_VALUE
        );
    }

    #[test]
    fn unmatched_question_gets_generic_template() {
        assert_eq!(rule_based("What is the meaning of life?"), GENERIC);
        assert_eq!(rule_based(""), GENERIC);
    }

    #[test]
    fn matching_is_case_insensitive_and_stable() {
        assert_eq!(
            rule_based("SHOW CUSTOMERS"),
            rule_based("show customers")
        );
    }
}
