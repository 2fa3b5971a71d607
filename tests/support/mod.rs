//! In-memory fake storage for service-layer tests
//!
//! The fakes implement the transaction and repository traits with
//! staged/committed state: a scope stages writes against a copy of the
//! committed tables, `commit` publishes the copy, `rollback` discards it.
//! Failure injection flags let tests force database errors at specific
//! points in a composite operation.

use async_trait::async_trait;
use medrec::adapters::database::traits::{
    AddressRepository, DoctorRepository, PersonRepository, TransactionProvider, TxScope,
};
use medrec::core::{AddressService, DoctorService, PersonService};
use medrec::domain::model::{AddressModel, DoctorModel, PersonModel};
use medrec::domain::{MedrecError, Result};
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct Tables {
    pub addresses: BTreeMap<i32, AddressModel>,
    pub persons: BTreeMap<i32, PersonModel>,
    /// Keyed by the shared person id; the nested person carries the id only,
    /// like the doctor table in storage.
    pub doctors: BTreeMap<i32, DoctorModel>,
    next_id: i32,
}

impl Tables {
    fn alloc_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Failure injection points.
#[derive(Default)]
pub struct Failures {
    pub address_insert: bool,
    pub person_insert: bool,
    pub doctor_insert: bool,
    pub person_fetch_id: Option<i32>,
    pub commit: bool,
}

#[derive(Default)]
pub struct FakeDb {
    pub committed: Tables,
    pub failures: Failures,
    pub begun: usize,
    pub commits: usize,
    pub rollbacks: usize,
    pub insert_calls: usize,
}

pub type SharedDb = Arc<Mutex<FakeDb>>;

pub fn new_db() -> SharedDb {
    Arc::new(Mutex::new(FakeDb::default()))
}

/// Wires the three services against the fakes, sharing one database.
pub fn build_services(db: &SharedDb) -> (AddressService, PersonService, DoctorService) {
    let provider = Arc::new(FakeProvider { db: db.clone() });
    let addresses = AddressService::new(provider.clone(), Arc::new(FakeAddressRepository));
    let persons = PersonService::new(
        provider.clone(),
        Arc::new(FakePersonRepository),
        addresses.clone(),
    );
    let doctors = DoctorService::new(
        provider,
        Arc::new(FakeDoctorRepository),
        persons.clone(),
        addresses.clone(),
    );
    (addresses, persons, doctors)
}

pub struct FakeTx {
    db: SharedDb,
    staged: Tables,
}

#[async_trait]
impl TxScope for FakeTx {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    async fn commit(&mut self) -> Result<()> {
        let mut db = self.db.lock().unwrap();
        db.commits += 1;
        if db.failures.commit {
            return Err(MedrecError::Database("injected commit failure".to_string()));
        }
        db.committed = self.staged.clone();
        Ok(())
    }

    async fn rollback(&mut self) {
        self.db.lock().unwrap().rollbacks += 1;
    }
}

pub struct FakeProvider {
    pub db: SharedDb,
}

#[async_trait]
impl TransactionProvider for FakeProvider {
    async fn begin(&self) -> Result<Box<dyn TxScope>> {
        let mut db = self.db.lock().unwrap();
        db.begun += 1;
        let staged = db.committed.clone();
        Ok(Box::new(FakeTx {
            db: self.db.clone(),
            staged,
        }))
    }
}

fn fake_tx(tx: &mut dyn TxScope) -> &mut FakeTx {
    tx.as_any_mut()
        .downcast_mut::<FakeTx>()
        .expect("fake transaction scope")
}

pub struct FakeAddressRepository;

#[async_trait]
impl AddressRepository for FakeAddressRepository {
    async fn insert(&self, tx: &mut dyn TxScope, model: &AddressModel) -> Result<AddressModel> {
        let tx = fake_tx(tx);
        {
            let mut db = tx.db.lock().unwrap();
            db.insert_calls += 1;
            if db.failures.address_insert {
                return Err(MedrecError::Database(
                    "injected address insert failure".to_string(),
                ));
            }
        }
        let id = tx.staged.alloc_id();
        let mut inserted = model.clone();
        inserted.id = Some(id);
        tx.staged.addresses.insert(id, inserted.clone());
        Ok(inserted)
    }

    async fn get_by_id(&self, tx: &mut dyn TxScope, id: i32) -> Result<AddressModel> {
        let tx = fake_tx(tx);
        tx.staged
            .addresses
            .get(&id)
            .cloned()
            .ok_or_else(|| MedrecError::validation(format!("Address {} not found", id)))
    }

    async fn get_all(&self, tx: &mut dyn TxScope) -> Result<Vec<AddressModel>> {
        let tx = fake_tx(tx);
        Ok(tx.staged.addresses.values().cloned().collect())
    }

    async fn update(&self, tx: &mut dyn TxScope, model: &AddressModel) -> Result<AddressModel> {
        let tx = fake_tx(tx);
        let id = model
            .id
            .ok_or_else(|| MedrecError::Database("update without id".to_string()))?;
        if !tx.staged.addresses.contains_key(&id) {
            return Err(MedrecError::validation(format!("Address {} not found", id)));
        }
        tx.staged.addresses.insert(id, model.clone());
        Ok(model.clone())
    }

    async fn delete(&self, tx: &mut dyn TxScope, id: i32) -> Result<u64> {
        let tx = fake_tx(tx);
        Ok(u64::from(tx.staged.addresses.remove(&id).is_some()))
    }
}

pub struct FakePersonRepository;

#[async_trait]
impl PersonRepository for FakePersonRepository {
    async fn insert(&self, tx: &mut dyn TxScope, model: &PersonModel) -> Result<PersonModel> {
        let tx = fake_tx(tx);
        {
            let mut db = tx.db.lock().unwrap();
            db.insert_calls += 1;
            if db.failures.person_insert {
                return Err(MedrecError::Database(
                    "injected person insert failure".to_string(),
                ));
            }
        }
        let id = tx.staged.alloc_id();
        let mut inserted = model.clone();
        inserted.id = Some(id);
        tx.staged.persons.insert(id, inserted.clone());
        Ok(inserted)
    }

    async fn get_by_id(&self, tx: &mut dyn TxScope, id: i32) -> Result<PersonModel> {
        let tx = fake_tx(tx);
        if tx.db.lock().unwrap().failures.person_fetch_id == Some(id) {
            return Err(MedrecError::Database(
                "injected person fetch failure".to_string(),
            ));
        }
        let mut person = tx
            .staged
            .persons
            .get(&id)
            .cloned()
            .ok_or_else(|| MedrecError::validation(format!("Person {} not found", id)))?;
        // Join in the owned address, as the SQL read does.
        if let Some(address_id) = person.address.id {
            if let Some(address) = tx.staged.addresses.get(&address_id) {
                person.address = address.clone();
            }
        }
        Ok(person)
    }

    async fn update(&self, tx: &mut dyn TxScope, model: &PersonModel) -> Result<PersonModel> {
        let tx = fake_tx(tx);
        let id = model
            .id
            .ok_or_else(|| MedrecError::Database("update without id".to_string()))?;
        let stored = tx
            .staged
            .persons
            .get_mut(&id)
            .ok_or_else(|| MedrecError::validation(format!("Person {} not found", id)))?;
        // Mirrors the SQL update: only the mutable columns change.
        stored.name = model.name.clone();
        stored.tax_id = model.tax_id.clone();
        stored.phone = model.phone.clone();
        Ok(model.clone())
    }

    async fn deactivate(&self, tx: &mut dyn TxScope, id: i32) -> Result<u64> {
        let tx = fake_tx(tx);
        match tx.staged.persons.get_mut(&id) {
            Some(person) if person.active => {
                person.active = false;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

pub struct FakeDoctorRepository;

#[async_trait]
impl DoctorRepository for FakeDoctorRepository {
    async fn insert(&self, tx: &mut dyn TxScope, model: &DoctorModel) -> Result<DoctorModel> {
        let tx = fake_tx(tx);
        {
            let mut db = tx.db.lock().unwrap();
            db.insert_calls += 1;
            if db.failures.doctor_insert {
                return Err(MedrecError::Database(
                    "injected doctor insert failure".to_string(),
                ));
            }
        }
        let id = model
            .person
            .id
            .ok_or_else(|| MedrecError::Database("doctor insert without person id".to_string()))?;
        tx.staged.doctors.insert(id, model.clone());
        Ok(model.clone())
    }

    async fn get_by_id(&self, tx: &mut dyn TxScope, id: i32) -> Result<DoctorModel> {
        let doctor = {
            let tx = fake_tx(tx);
            tx.staged
                .doctors
                .get(&id)
                .cloned()
                .ok_or_else(|| MedrecError::validation(format!("Doctor {} not found", id)))?
        };
        let person = FakePersonRepository.get_by_id(tx, id).await?;
        Ok(DoctorModel {
            person,
            license_code: doctor.license_code,
            specialty: doctor.specialty,
        })
    }

    async fn get_all(&self, tx: &mut dyn TxScope) -> Result<Vec<DoctorModel>> {
        let tx = fake_tx(tx);
        Ok(tx
            .staged
            .doctors
            .iter()
            .map(|(id, doctor)| DoctorModel {
                person: PersonModel {
                    id: Some(*id),
                    ..PersonModel::default()
                },
                license_code: doctor.license_code.clone(),
                specialty: doctor.specialty,
            })
            .collect())
    }

    async fn deactivate(&self, tx: &mut dyn TxScope, id: i32) -> Result<u64> {
        let tx = fake_tx(tx);
        if !tx.staged.doctors.contains_key(&id) {
            return Ok(0);
        }
        match tx.staged.persons.get_mut(&id) {
            Some(person) if person.active => {
                person.active = false;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
