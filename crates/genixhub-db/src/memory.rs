//! In-memory account store.
//!
//! Mirrors the uniqueness rules of the PostgreSQL schema so the HTTP layer
//! behaves the same on either backend. Data lives only as long as the
//! process.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use genixhub_auth::Role;
use genixhub_core::AppError;
use genixhub_models::{NewSchool, NewStudent, School, Student};

use crate::store::{AccountStore, SCHOOL_HAS_STUDENTS, UniqueField};

#[derive(Debug, Default)]
struct Accounts {
    /// Kept in insertion order
    schools: Vec<School>,
    students: Vec<Student>,
}

impl Accounts {
    fn school_conflict(&self, new: &NewSchool) -> Option<UniqueField> {
        self.schools.iter().find_map(|s| {
            if s.name == new.name {
                Some(UniqueField::SchoolName)
            } else if s.contact_email == new.contact_email {
                Some(UniqueField::SchoolContactEmail)
            } else {
                None
            }
        })
    }

    fn student_conflict(&self, new: &NewStudent) -> Option<UniqueField> {
        self.students.iter().find_map(|s| {
            let same_school = s.school_id == new.school_id;
            if same_school && s.name == new.name {
                Some(UniqueField::StudentNameInSchool)
            } else if same_school && s.class_name == new.class_name && s.roll_no == new.roll_no {
                Some(UniqueField::StudentRollNoInClass)
            } else if s.email == new.email {
                Some(UniqueField::StudentEmail)
            } else if s.mobile == new.mobile {
                Some(UniqueField::StudentMobile)
            } else {
                None
            }
        })
    }

    fn refresh_slot(&mut self, role: Role, id: Uuid) -> Option<&mut Option<String>> {
        match role {
            Role::School => self
                .schools
                .iter_mut()
                .find(|s| s.id == id)
                .map(|s| &mut s.refresh_token),
            Role::Student => self
                .students
                .iter_mut()
                .find(|s| s.id == id)
                .map(|s| &mut s.refresh_token),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Accounts>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    #[instrument(skip(self, school), fields(name = %school.name))]
    async fn insert_school(&self, school: NewSchool) -> Result<School, AppError> {
        let mut accounts = self.accounts.write().await;
        if let Some(field) = accounts.school_conflict(&school) {
            return Err(field.conflict());
        }

        let now = Utc::now();
        let record = School {
            id: Uuid::new_v4(),
            name: school.name,
            password_hash: school.password_hash,
            address: school.address,
            city: school.city,
            state: school.state,
            pincode: school.pincode,
            principal_name: school.principal_name,
            contact_email: school.contact_email,
            contact_phone: school.contact_phone,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        accounts.schools.push(record.clone());
        Ok(record)
    }

    async fn find_school_by_id(&self, id: Uuid) -> Result<Option<School>, AppError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.schools.iter().find(|s| s.id == id).cloned())
    }

    async fn find_school_by_name(&self, name: &str) -> Result<Option<School>, AppError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.schools.iter().find(|s| s.name == name).cloned())
    }

    async fn list_schools(&self, limit: i64, offset: i64) -> Result<(Vec<School>, i64), AppError> {
        let accounts = self.accounts.read().await;
        let mut schools: Vec<&School> = accounts.schools.iter().collect();
        schools.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let page = schools
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();

        Ok((page, accounts.schools.len() as i64))
    }

    #[instrument(skip(self, student), fields(name = %student.name, school_id = %student.school_id))]
    async fn insert_student(&self, student: NewStudent) -> Result<Student, AppError> {
        let mut accounts = self.accounts.write().await;
        if let Some(field) = accounts.student_conflict(&student) {
            return Err(field.conflict());
        }
        if !accounts.schools.iter().any(|s| s.id == student.school_id) {
            return Err(AppError::school_not_found());
        }

        let now = Utc::now();
        let record = Student {
            id: Uuid::new_v4(),
            school_id: student.school_id,
            name: student.name,
            password_hash: student.password_hash,
            class_name: student.class_name,
            section: student.section,
            gender: student.gender,
            roll_no: student.roll_no,
            mobile: student.mobile,
            father_name: student.father_name,
            mother_name: student.mother_name,
            email: student.email,
            date_of_birth: student.date_of_birth,
            address: student.address,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        accounts.students.push(record.clone());
        Ok(record)
    }

    async fn find_student_by_name(
        &self,
        name: &str,
        school_id: Option<Uuid>,
    ) -> Result<Option<Student>, AppError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .students
            .iter()
            .find(|s| s.name == name && school_id.is_none_or(|id| s.school_id == id))
            .cloned())
    }

    async fn account_exists(&self, role: Role, id: Uuid) -> Result<bool, AppError> {
        let accounts = self.accounts.read().await;
        Ok(match role {
            Role::School => accounts.schools.iter().any(|s| s.id == id),
            Role::Student => accounts.students.iter().any(|s| s.id == id),
        })
    }

    async fn refresh_token(&self, role: Role, id: Uuid) -> Result<Option<String>, AppError> {
        let accounts = self.accounts.read().await;
        Ok(match role {
            Role::School => accounts
                .schools
                .iter()
                .find(|s| s.id == id)
                .and_then(|s| s.refresh_token.clone()),
            Role::Student => accounts
                .students
                .iter()
                .find(|s| s.id == id)
                .and_then(|s| s.refresh_token.clone()),
        })
    }

    #[instrument(skip(self, token))]
    async fn set_refresh_token(
        &self,
        role: Role,
        id: Uuid,
        token: Option<&str>,
    ) -> Result<bool, AppError> {
        let mut accounts = self.accounts.write().await;
        match accounts.refresh_slot(role, id) {
            Some(slot) => {
                *slot = token.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, role: Role, id: Uuid) -> Result<bool, AppError> {
        let mut accounts = self.accounts.write().await;
        match role {
            Role::School => {
                if accounts.students.iter().any(|s| s.school_id == id) {
                    return Err(AppError::conflict(SCHOOL_HAS_STUDENTS));
                }
                let before = accounts.schools.len();
                accounts.schools.retain(|s| s.id != id);
                Ok(accounts.schools.len() < before)
            }
            Role::Student => {
                let before = accounts.students.len();
                accounts.students.retain(|s| s.id != id);
                Ok(accounts.students.len() < before)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use genixhub_core::ErrorKind;

    fn new_school(name: &str, email: &str) -> NewSchool {
        NewSchool {
            name: name.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            address: "Mathura Road".to_string(),
            city: "New Delhi".to_string(),
            state: "Delhi".to_string(),
            pincode: "110003".to_string(),
            principal_name: "Anita Sharma".to_string(),
            contact_email: email.to_string(),
            contact_phone: "9876543210".to_string(),
        }
    }

    fn new_student(school_id: Uuid, name: &str, roll_no: &str, email: &str, mobile: &str) -> NewStudent {
        NewStudent {
            school_id,
            name: name.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            class_name: "10".to_string(),
            section: "A".to_string(),
            gender: "male".to_string(),
            roll_no: roll_no.to_string(),
            mobile: mobile.to_string(),
            father_name: "Rohit Gupta".to_string(),
            mother_name: "Neha Gupta".to_string(),
            email: email.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 4, 15).unwrap(),
            address: "12 Lodhi Estate, New Delhi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_school_uniqueness() {
        let store = MemoryAccountStore::new();
        store.insert_school(new_school("DPS", "a@dps.in")).await.unwrap();

        let err = store.insert_school(new_school("DPS", "b@dps.in")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "Name already exists");

        let err = store.insert_school(new_school("DAV", "a@dps.in")).await.unwrap_err();
        assert_eq!(err.message, "Contact email already exists");
    }

    #[tokio::test]
    async fn test_student_uniqueness_is_scoped_to_school() {
        let store = MemoryAccountStore::new();
        let dps = store.insert_school(new_school("DPS", "a@dps.in")).await.unwrap();
        let dav = store.insert_school(new_school("DAV", "a@dav.in")).await.unwrap();

        store
            .insert_student(new_student(dps.id, "Aarav", "1", "aarav@x.in", "9000000001"))
            .await
            .unwrap();

        // Same name and roll number in another school is fine
        store
            .insert_student(new_student(dav.id, "Aarav", "1", "aarav2@x.in", "9000000002"))
            .await
            .unwrap();

        let err = store
            .insert_student(new_student(dps.id, "Aarav", "2", "aarav3@x.in", "9000000003"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Name already exists");

        let err = store
            .insert_student(new_student(dps.id, "Vihaan", "1", "vihaan@x.in", "9000000004"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Roll number already exists");

        let err = store
            .insert_student(new_student(dps.id, "Vihaan", "3", "aarav@x.in", "9000000005"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Email already exists");

        let err = store
            .insert_student(new_student(dps.id, "Vihaan", "3", "vihaan@x.in", "9000000001"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Mobile already exists");
    }

    #[tokio::test]
    async fn test_find_student_by_name_prefers_earliest() {
        let store = MemoryAccountStore::new();
        let dps = store.insert_school(new_school("DPS", "a@dps.in")).await.unwrap();
        let dav = store.insert_school(new_school("DAV", "a@dav.in")).await.unwrap();

        let first = store
            .insert_student(new_student(dps.id, "Aarav", "1", "a1@x.in", "9000000001"))
            .await
            .unwrap();
        let second = store
            .insert_student(new_student(dav.id, "Aarav", "1", "a2@x.in", "9000000002"))
            .await
            .unwrap();

        let found = store.find_student_by_name("Aarav", None).await.unwrap().unwrap();
        assert_eq!(found.id, first.id);

        let found = store
            .find_student_by_name("Aarav", Some(dav.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, second.id);
    }

    #[tokio::test]
    async fn test_list_schools_sorted_and_paged() {
        let store = MemoryAccountStore::new();
        for (name, email) in [("Cedar", "c@x.in"), ("Alder", "a@x.in"), ("Birch", "b@x.in")] {
            store.insert_school(new_school(name, email)).await.unwrap();
        }

        let (page, total) = store.list_schools(2, 0).await.unwrap();
        assert_eq!(total, 3);
        let names: Vec<_> = page.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Alder", "Birch"]);

        let (page, _) = store.list_schools(2, 2).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Cedar");
    }

    #[tokio::test]
    async fn test_refresh_token_lifecycle() {
        let store = MemoryAccountStore::new();
        let school = store.insert_school(new_school("DPS", "a@dps.in")).await.unwrap();

        assert_eq!(store.refresh_token(Role::School, school.id).await.unwrap(), None);
        assert!(store
            .set_refresh_token(Role::School, school.id, Some("t1"))
            .await
            .unwrap());
        assert_eq!(
            store.refresh_token(Role::School, school.id).await.unwrap().as_deref(),
            Some("t1")
        );
        assert!(store.set_refresh_token(Role::School, school.id, None).await.unwrap());
        assert_eq!(store.refresh_token(Role::School, school.id).await.unwrap(), None);

        assert!(!store
            .set_refresh_token(Role::Student, school.id, Some("t2"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete_school_with_students_is_refused() {
        let store = MemoryAccountStore::new();
        let school = store.insert_school(new_school("DPS", "a@dps.in")).await.unwrap();
        let student = store
            .insert_student(new_student(school.id, "Aarav", "1", "a@x.in", "9000000001"))
            .await
            .unwrap();

        let err = store.delete_account(Role::School, school.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        assert!(store.delete_account(Role::Student, student.id).await.unwrap());
        assert!(!store.account_exists(Role::Student, student.id).await.unwrap());
        assert!(store.delete_account(Role::School, school.id).await.unwrap());
        assert!(!store.delete_account(Role::School, school.id).await.unwrap());
    }
}
