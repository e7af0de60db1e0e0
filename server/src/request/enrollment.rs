use application::transfer::EnrollDto;
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;

/// Body of `/courses/:id/register` and `/courses/:id/unregister`. May be omitted.
#[derive(Debug, Default, Deserialize)]
pub struct EnrollRequest {
    #[serde(default, alias = "userId")]
    user_id: Option<Uuid>,
}

pub struct EnrollmentTransformer;

impl Intake<(Uuid, Option<EnrollRequest>)> for EnrollmentTransformer {
    type To = EnrollDto;
    fn emit(&self, (course_id, input): (Uuid, Option<EnrollRequest>)) -> Self::To {
        EnrollDto {
            course_id,
            user_id: input.unwrap_or_default().user_id,
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::controller::Intake;

    use super::{EnrollRequest, EnrollmentTransformer};

    #[test]
    fn missing_body_targets_the_caller() {
        let course_id = Uuid::new_v4();
        let dto = EnrollmentTransformer.emit((course_id, None));
        assert_eq!(dto.course_id, course_id);
        assert_eq!(dto.user_id, None);

        let empty: EnrollRequest = serde_json::from_str("{}").expect("valid body");
        assert_eq!(EnrollmentTransformer.emit((course_id, Some(empty))).user_id, None);
    }

    #[test]
    fn user_id_is_read_in_either_case_style() {
        let user_id = Uuid::new_v4();
        for key in ["user_id", "userId"] {
            let body = format!(r#"{{"{key}": "{user_id}"}}"#);
            let request: EnrollRequest = serde_json::from_str(&body).expect("valid body");
            let dto = EnrollmentTransformer.emit((Uuid::new_v4(), Some(request)));
            assert_eq!(dto.user_id, Some(user_id));
        }
    }
}
