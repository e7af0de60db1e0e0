use std::io::Read;

use error_stack::ResultExt;
use serde::Deserialize;

use application::transfer::CreateCourseDto;
use kernel::KernelError;

/// One line of the course catalog file.
///
/// Header: `string_id,title,description,schedule,classroom_number,maximum_capacity,credit_hours,tuition_cost`
#[derive(Debug, Deserialize)]
struct CatalogRow {
    string_id: String,
    title: String,
    description: String,
    schedule: String,
    classroom_number: String,
    maximum_capacity: i32,
    credit_hours: i32,
    tuition_cost: i64,
}

impl From<CatalogRow> for CreateCourseDto {
    fn from(row: CatalogRow) -> Self {
        Self {
            code: Some(row.string_id),
            title: row.title,
            description: Some(row.description),
            schedule: Some(row.schedule),
            classroom_number: Some(row.classroom_number),
            credit_hours: Some(row.credit_hours),
            tuition_cost: Some(row.tuition_cost),
            capacity: Some(row.maximum_capacity),
        }
    }
}

pub fn read_catalog(reader: impl Read) -> error_stack::Result<Vec<CreateCourseDto>, KernelError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize::<CatalogRow>()
        .enumerate()
        .map(|(index, row)| {
            row.map(CreateCourseDto::from)
                .change_context(KernelError::Invalid)
                // line 1 is the header
                .attach_printable_lazy(|| format!("catalog line {}", index + 2))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use super::read_catalog;

    const HEADER: &str = "string_id,title,description,schedule,classroom_number,maximum_capacity,credit_hours,tuition_cost\n";

    #[test]
    fn reads_every_column() {
        let data = format!(
            "{HEADER}CS-101,Programming I,\"Loops, functions\",MWF 09:00,A-101,30,3,45000\n\
             MA-201, Calculus ,,TTh 11:00,B-12,25,4,52000\n"
        );
        let courses = read_catalog(data.as_bytes()).expect("valid catalog");
        assert_eq!(courses.len(), 2);

        let first = &courses[0];
        assert_eq!(first.code.as_deref(), Some("CS-101"));
        assert_eq!(first.title, "Programming I");
        assert_eq!(first.description.as_deref(), Some("Loops, functions"));
        assert_eq!(first.capacity, Some(30));
        assert_eq!(first.credit_hours, Some(3));
        assert_eq!(first.tuition_cost, Some(45000));

        let second = &courses[1];
        assert_eq!(second.title, "Calculus");
        assert_eq!(second.description.as_deref(), Some(""));
        assert_eq!(second.classroom_number.as_deref(), Some("B-12"));
    }

    #[test]
    fn malformed_lines_are_invalid() {
        let data = format!("{HEADER}CS-101,Programming I,,MWF,A-101,thirty,3,45000\n");
        let error = read_catalog(data.as_bytes()).expect_err("capacity is not a number");
        assert_eq!(*error.current_context(), KernelError::Invalid);

        let data = "string_id,title\nCS-101,Programming I\n";
        let error = read_catalog(data.as_bytes()).expect_err("columns are missing");
        assert_eq!(*error.current_context(), KernelError::Invalid);
    }

    #[test]
    fn header_only_is_empty() {
        let courses = read_catalog(HEADER.as_bytes()).expect("valid catalog");
        assert!(courses.is_empty());
    }
}
