use crate::domain::{ComplexRecord, ListingRow};
use crate::harvester::HarvestError;
use rust_xlsxwriter::{Workbook, Worksheet};

enum Cell<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
}

fn write_header(ws: &mut Worksheet, headers: &[&str]) -> Result<(), HarvestError> {
    for (col, header) in headers.iter().enumerate() {
        ws.write_string(0, col as u16, *header).map_err(|e| {
            HarvestError::Xlsx(format!("Failed to write header '{}': {}", header, e))
        })?;
    }
    Ok(())
}

/// Absent values leave the cell blank rather than writing a zero.
fn write_row(ws: &mut Worksheet, row: u32, cells: &[Cell<'_>]) -> Result<(), HarvestError> {
    for (col, cell) in cells.iter().enumerate() {
        let col = col as u16;
        let result = match cell {
            Cell::Text(Some(s)) => ws.write_string(row, col, *s).map(|_| ()),
            Cell::Number(Some(n)) => ws.write_number(row, col, *n).map(|_| ()),
            Cell::Text(None) | Cell::Number(None) => Ok(()),
        };
        result.map_err(|e| {
            HarvestError::Xlsx(format!("Failed to write row {row} column {col}: {e}"))
        })?;
    }
    Ok(())
}

pub fn export_harvest_xlsx(
    complexes: &[ComplexRecord],
    listings: &[ListingRow],
) -> Result<Vec<u8>, HarvestError> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("complexes")
        .map_err(|e| HarvestError::Xlsx(format!("Failed to name sheet: {}", e)))?;

    write_header(
        worksheet,
        &[
            "Complex No",
            "Region",
            "Name",
            "Year",
            "Units",
            "Low Floor",
            "High Floor",
            "Price Min",
            "Price Max",
            "Price Median",
            "Area Min",
            "Area Max",
            "Area Rep",
            "Listing Type",
            "Floor",
            "Orientation",
            "Listings",
            "Road Address",
            "Latitude",
            "Longitude",
            "Extracted At",
        ],
    )?;

    for (i, c) in complexes.iter().enumerate() {
        write_row(
            worksheet,
            (i + 1) as u32,
            &[
                Cell::Text(Some(c.complex_no.as_str())),
                Cell::Text(c.region_code.as_deref()),
                Cell::Text(c.name.as_deref()),
                Cell::Number(c.year.map(f64::from)),
                Cell::Number(c.units.map(f64::from)),
                Cell::Number(c.low_floor.map(f64::from)),
                Cell::Number(c.high_floor.map(f64::from)),
                Cell::Number(c.price_min.map(|v| v as f64)),
                Cell::Number(c.price_max.map(|v| v as f64)),
                Cell::Number(c.price_median.map(|v| v as f64)),
                Cell::Number(c.area_min),
                Cell::Number(c.area_max),
                Cell::Number(c.area_rep),
                Cell::Text(c.listing_type.as_deref()),
                Cell::Text(c.floor.as_deref()),
                Cell::Text(c.orientation.as_deref()),
                Cell::Number(c.listing_count.map(f64::from)),
                Cell::Text(c.road_address.as_deref()),
                Cell::Number(c.latitude),
                Cell::Number(c.longitude),
                Cell::Text(c.extracted_at.as_deref()),
            ],
        )?;
    }

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("listings")
        .map_err(|e| HarvestError::Xlsx(format!("Failed to name sheet: {}", e)))?;

    write_header(
        worksheet,
        &[
            "Complex No",
            "Complex Name",
            "Article No",
            "Article Name",
            "Trade Type",
            "Price Text",
            "Price",
            "Rent",
            "Supply Area",
            "Exclusive Area",
            "Floor",
            "Direction",
            "Confirmed",
            "Realtor",
            "Extracted At",
        ],
    )?;

    for (i, l) in listings.iter().enumerate() {
        write_row(
            worksheet,
            (i + 1) as u32,
            &[
                Cell::Text(Some(l.complex_no.as_str())),
                Cell::Text(Some(l.complex_name.as_str())),
                Cell::Text(Some(l.article_no.as_str())),
                Cell::Text(l.article_name.as_deref()),
                Cell::Text(l.trade_type.as_deref()),
                Cell::Text(l.price_text.as_deref()),
                Cell::Number(l.price.map(|v| v as f64)),
                Cell::Text(l.rent_price.as_deref()),
                Cell::Number(l.area_supply),
                Cell::Number(l.area_exclusive),
                Cell::Text(l.floor.as_deref()),
                Cell::Text(l.direction.as_deref()),
                Cell::Text(l.confirmed_on.as_deref()),
                Cell::Text(l.realtor.as_deref()),
                Cell::Text(Some(l.extracted_at.as_str())),
            ],
        )?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| HarvestError::Xlsx(format!("Failed to save workbook: {}", e)))
}
