//! Search result table
//!
//! Fixed six columns. Rows keep the order the backend returned them in.

use std::borrow::Cow;

use shared::Product;

/// A result table column: title and HTML width class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub class: &'static str,
    /// Relative width (grid units) for terminal layouts
    pub width: u16,
}

pub const COLUMNS: [Column; 6] = [
    Column {
        title: "ID",
        class: "col-md-1",
        width: 1,
    },
    Column {
        title: "Name",
        class: "col-md-3",
        width: 3,
    },
    Column {
        title: "Category",
        class: "col-md-3",
        width: 3,
    },
    Column {
        title: "Price",
        class: "col-md-2",
        width: 2,
    },
    Column {
        title: "Stock",
        class: "col-md-2",
        width: 2,
    },
    Column {
        title: "Description",
        class: "col-md-4",
        width: 4,
    },
];

/// Rendered search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<Product>,
}

impl ResultTable {
    pub fn new(rows: Vec<Product>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Product] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First hit, the one copied into the form
    pub fn first(&self) -> Option<&Product> {
        self.rows.first()
    }

    /// Cell values of one record, in column order
    pub fn cells(product: &Product) -> [&str; 6] {
        [
            &product.id,
            &product.name,
            &product.category,
            &product.price,
            &product.stock,
            &product.description,
        ]
    }

    /// Header row plus one `<tr>` per record
    pub fn to_html(&self) -> String {
        let mut html = String::from("<tr>");
        for column in COLUMNS {
            html.push_str(&format!(
                "<th class=\"{}\">{}</th>",
                column.class, column.title
            ));
        }
        html.push_str("</tr>");

        for product in &self.rows {
            html.push_str("<tr>");
            for (column, value) in COLUMNS.iter().zip(Self::cells(product)) {
                html.push_str(&format!(
                    "<td class=\"{}\">{}</td>",
                    column.class,
                    escape_html(value)
                ));
            }
            html.push_str("</tr>");
        }

        html
    }
}

/// Escape text for an HTML text node
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            category: "food".into(),
            price: "4.5".into(),
            stock: "10".into(),
            description: "Fresh".into(),
        }
    }

    #[test]
    fn test_empty_table_is_header_only() {
        let html = ResultTable::default().to_html();
        assert_eq!(html.matches("<tr>").count(), 1);
        assert_eq!(html.matches("<th ").count(), 6);
        assert!(!html.contains("<td"));
    }

    #[test]
    fn test_one_row_per_record_in_order() {
        let table = ResultTable::new(vec![product("2", "Bread"), product("1", "Apple")]);
        let html = table.to_html();

        assert_eq!(html.matches("<tr>").count(), 3);
        let bread = html.find("Bread").unwrap();
        let apple = html.find("Apple").unwrap();
        assert!(bread < apple);
        assert_eq!(table.first().unwrap().id, "2");
    }

    #[test]
    fn test_row_uses_column_classes() {
        let html = ResultTable::new(vec![product("7", "Rice")]).to_html();
        assert!(html.ends_with(
            "<tr><td class=\"col-md-1\">7</td><td class=\"col-md-3\">Rice</td>\
             <td class=\"col-md-3\">food</td><td class=\"col-md-2\">4.5</td>\
             <td class=\"col-md-2\">10</td><td class=\"col-md-4\">Fresh</td></tr>"
        ));
    }

    #[test]
    fn test_cell_text_is_escaped() {
        let html = ResultTable::new(vec![product("1", "<b>Tom & Jerry</b>")]).to_html();
        assert!(html.contains("&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_escape_borrows_plain_text() {
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }
}
