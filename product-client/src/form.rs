//! Product form
//!
//! The six text inputs a user edits. Every action reads from here at the
//! moment it is triggered, and every completion writes back here.

use shared::{PriceBand, Product, ProductPayload, ProductQuery};

/// One input of the product form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Id,
    Name,
    Category,
    Price,
    Stock,
    Description,
}

impl FormField {
    /// Display order
    pub const ALL: [FormField; 6] = [
        FormField::Id,
        FormField::Name,
        FormField::Category,
        FormField::Price,
        FormField::Stock,
        FormField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Id => "ID",
            FormField::Name => "Name",
            FormField::Category => "Category",
            FormField::Price => "Price",
            FormField::Stock => "Stock",
            FormField::Description => "Description",
        }
    }

    /// Extra text shown next to the label
    pub fn hint(self) -> Option<String> {
        match self {
            FormField::Price => Some(format!("search band: {}", PriceBand::hint())),
            _ => None,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous field, wrapping around
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Current values of the product form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub description: String,
}

impl ProductForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Name => &self.name,
            FormField::Category => &self.category,
            FormField::Price => &self.price,
            FormField::Stock => &self.stock,
            FormField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Id => self.id = value,
            FormField::Name => self.name = value,
            FormField::Category => self.category = value,
            FormField::Price => self.price = value,
            FormField::Stock => self.stock = value,
            FormField::Description => self.description = value,
        }
    }

    /// Overwrite all six fields with a returned record
    pub fn populate(&mut self, product: &Product) {
        self.id = product.id.clone();
        self.name = product.name.clone();
        self.category = product.category.clone();
        self.price = product.price.clone();
        self.stock = product.stock.clone();
        self.description = product.description.clone();
    }

    /// Empty the five data fields, keeping the identifier
    pub fn clear_fields(&mut self) {
        self.name.clear();
        self.category.clear();
        self.price.clear();
        self.stock.clear();
        self.description.clear();
    }

    /// Empty every field including the identifier
    pub fn clear(&mut self) {
        self.id.clear();
        self.clear_fields();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Create / update body
    pub fn payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price.clone(),
            stock: self.stock.clone(),
            description: self.description.clone(),
        }
    }

    /// Search filters from name, category and price
    pub fn query(&self) -> ProductQuery {
        ProductQuery::from_fields(&self.name, &self.category, &self.price)
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        let mut form = Self::default();
        form.populate(product);
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: "3".into(),
            name: "Leash".into(),
            category: "pet".into(),
            price: "9.99".into(),
            stock: "12".into(),
            description: "Red".into(),
        }
    }

    #[test]
    fn test_populate_copies_all_six_fields() {
        let mut form = ProductForm {
            id: "old".into(),
            name: "stale".into(),
            ..Default::default()
        };
        form.populate(&sample());

        assert_eq!(form, ProductForm::from(&sample()));
        assert_eq!(form.id, "3");
        assert_eq!(form.description, "Red");
    }

    #[test]
    fn test_clear_fields_keeps_id() {
        let mut form = ProductForm::from(&sample());
        form.clear_fields();

        assert_eq!(form.id, "3");
        assert!(form.name.is_empty());
        assert!(form.stock.is_empty());
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut form = ProductForm::from(&sample());
        form.clear();
        assert!(form.is_empty());
    }

    #[test]
    fn test_payload_and_query_read_raw_text() {
        let mut form = ProductForm::from(&sample());
        form.set(FormField::Price, "12,5");
        form.set(FormField::Name, "");

        assert_eq!(form.payload().price, "12,5");
        assert_eq!(form.query().to_query_string(), "?category=pet&price=12,5");
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(FormField::Id.next(), FormField::Name);
        assert_eq!(FormField::Description.next(), FormField::Id);
        assert_eq!(FormField::Id.prev(), FormField::Description);
        assert!(FormField::Price.hint().is_some());
        assert!(FormField::Name.hint().is_none());
    }
}
