use std::fmt;
use std::str::FromStr;

use enum_iterator::all;
use enum_iterator::Sequence;
use strum_macros::Display;
use strum_macros::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum PropertyCategory {
    Country,
    Location,
    Organization,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Sequence)]
pub enum CountryField {
    #[strum(serialize = "COUNTRY_NAME")]
    Name,
    #[strum(serialize = "COUNTRY_CODE")]
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Sequence)]
pub enum LocationField {
    #[strum(serialize = "AREA_CODE")]
    AreaCode,
    #[strum(serialize = "CITY")]
    City,
    #[strum(serialize = "DMA_CODE")]
    DmaCode,
    #[strum(serialize = "LATITUDE")]
    Latitude,
    #[strum(serialize = "LONGITUDE")]
    Longitude,
    #[strum(serialize = "METRO_CODE")]
    MetroCode,
    #[strum(serialize = "POSTAL_CODE")]
    PostalCode,
    #[strum(serialize = "REGION")]
    Region,
}

impl LocationField {
    /// Fields that may be absent from a location record. The numeric ones
    /// always render once a record exists.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            LocationField::City | LocationField::PostalCode | LocationField::Region
        )
    }
}

/// A requested property, one of the closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum Property {
    Country(CountryField),
    Location(LocationField),
    Org,
    Id,
}

impl Property {
    /// Normalizes `raw` to upper-case and maps it onto the vocabulary.
    /// Names outside of it are `None`, which evaluates to a null result.
    pub fn parse(raw: &str) -> Option<Property> {
        raw.to_uppercase().parse().ok()
    }

    pub fn category(&self) -> PropertyCategory {
        match self {
            Property::Country(_) => PropertyCategory::Country,
            Property::Location(_) => PropertyCategory::Location,
            Property::Org => PropertyCategory::Organization,
            Property::Id => PropertyCategory::Id,
        }
    }

    pub fn all() -> impl Iterator<Item = Property> {
        all::<Property>()
    }
}

impl FromStr for Property {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(field) = CountryField::from_str(s) {
            return Ok(Property::Country(field));
        }
        if let Ok(field) = LocationField::from_str(s) {
            return Ok(Property::Location(field));
        }

        match s {
            "ORG" => Ok(Property::Org),
            "ID" => Ok(Property::Id),
            _ => Err(strum::ParseError::VariantNotFound),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Country(field) => write!(f, "{field}"),
            Property::Location(field) => write!(f, "{field}"),
            Property::Org => write!(f, "ORG"),
            Property::Id => write!(f, "ID"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CountryField;
    use super::LocationField;
    use super::Property;
    use super::PropertyCategory;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            Property::parse("country_name"),
            Some(Property::Country(CountryField::Name))
        );
        assert_eq!(
            Property::parse("Postal_Code"),
            Some(Property::Location(LocationField::PostalCode))
        );
        assert_eq!(Property::parse("org"), Some(Property::Org));
        assert_eq!(Property::parse("Id"), Some(Property::Id));
    }

    #[test]
    fn unknown_names() {
        assert_eq!(Property::parse("BOGUS"), None);
        assert_eq!(Property::parse(""), None);
        assert_eq!(Property::parse(" CITY"), None);
        assert_eq!(Property::parse("COUNTRY"), None);
    }

    #[test]
    fn vocabulary() {
        let names = Property::all().map(|p| p.to_string()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "COUNTRY_NAME",
                "COUNTRY_CODE",
                "AREA_CODE",
                "CITY",
                "DMA_CODE",
                "LATITUDE",
                "LONGITUDE",
                "METRO_CODE",
                "POSTAL_CODE",
                "REGION",
                "ORG",
                "ID",
            ]
        );

        for p in Property::all() {
            assert_eq!(Property::parse(&p.to_string()), Some(p));
        }
    }

    #[test]
    fn categories() {
        assert_eq!(
            Property::Country(CountryField::Code).category(),
            PropertyCategory::Country
        );
        assert_eq!(
            Property::Location(LocationField::Latitude).category(),
            PropertyCategory::Location
        );
        assert_eq!(Property::Org.category(), PropertyCategory::Organization);
        assert_eq!(Property::Id.category(), PropertyCategory::Id);
    }

    #[test]
    fn nullable_location_fields() {
        let nullable = enum_iterator::all::<LocationField>()
            .filter(|f| f.is_nullable())
            .collect::<Vec<_>>();
        assert_eq!(
            nullable,
            vec![
                LocationField::City,
                LocationField::PostalCode,
                LocationField::Region
            ]
        );
    }
}
