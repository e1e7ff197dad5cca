use crate::domain::ClassifiedRecord;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    SubArea,
    Year,
    Units,
    Price,
    Area,
    PricePerArea,
    PriceBand,
}

impl SortColumn {
    pub const ALL: [SortColumn; 8] = [
        SortColumn::Name,
        SortColumn::SubArea,
        SortColumn::Year,
        SortColumn::Units,
        SortColumn::Price,
        SortColumn::Area,
        SortColumn::PricePerArea,
        SortColumn::PriceBand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::SubArea => "sub_area",
            SortColumn::Year => "year",
            SortColumn::Units => "units",
            SortColumn::Price => "price",
            SortColumn::Area => "area",
            SortColumn::PricePerArea => "price_per_area",
            SortColumn::PriceBand => "price_band",
        }
    }

    pub fn parse(raw: &str) -> Option<SortColumn> {
        SortColumn::ALL.into_iter().find(|c| c.as_str() == raw)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Name => "Complex",
            SortColumn::SubArea => "Sub-area",
            SortColumn::Year => "Built",
            SortColumn::Units => "Units",
            SortColumn::Price => "Median price",
            SortColumn::Area => "Area (㎡)",
            SortColumn::PricePerArea => "Price / ㎡",
            SortColumn::PriceBand => "Band",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<SortDirection> {
        match raw {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// The single active (column, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::Price,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// State after clicking `column`'s header.
    ///
    /// The active column cycles descending, ascending, then back to the
    /// default. Any other column starts descending.
    pub fn toggle(self, column: SortColumn) -> SortState {
        if column != self.column {
            return SortState {
                column,
                direction: SortDirection::Desc,
            };
        }
        match self.direction {
            SortDirection::Desc => SortState {
                column,
                direction: SortDirection::Asc,
            },
            SortDirection::Asc => SortState::default(),
        }
    }

    pub fn compare(&self, a: &ClassifiedRecord, b: &ClassifiedRecord) -> Ordering {
        let ord = match self.column {
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::SubArea => a.sub_area.cmp(&b.sub_area),
            SortColumn::Year => a.year.cmp(&b.year),
            SortColumn::Units => a.units.cmp(&b.units),
            SortColumn::Price => a.valid_price().cmp(&b.valid_price()),
            SortColumn::Area => cmp_f64(a.area_rep, b.area_rep),
            SortColumn::PricePerArea => a.valid_price_per_area().cmp(&b.valid_price_per_area()),
            SortColumn::PriceBand => a.price_band.cmp(&b.price_band),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    /// Stable sort, so equal keys keep their incoming order.
    pub fn sort(&self, rows: &mut [ClassifiedRecord]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }
}

// Absent sorts below every present value.
fn cmp_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
