//! Shared fakes for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use turno_core::{
    AdminUser, Customer, DateRange, Result, Scope, Service, Staff, TurnoError,
};
use turno_directory::Directory;
use turno_slots::Availability;
use uuid::Uuid;

use crate::backend::{AnnouncementRequest, AppointmentRequest, SchedulingBackend};
use crate::context::TurnContext;

/// An in-memory world acting as directory, availability source and
/// scheduling backend at once. Mutations are recorded for assertions.
pub(crate) struct FakeWorld {
    pub scope: Scope,
    pub staff: Vec<Staff>,
    pub services: Vec<Service>,
    pub customers: Vec<Customer>,
    pub admins: Vec<AdminUser>,
    pub slots: HashMap<(NaiveDate, Uuid), Vec<NaiveTime>>,
    pub loads: HashMap<Uuid, u32>,
    pub fail_mutations: bool,
    pub appointments: Mutex<Vec<AppointmentRequest>>,
    pub shop_holidays: Mutex<Vec<DateRange>>,
    pub staff_holidays: Mutex<Vec<(Uuid, DateRange)>>,
    pub announcements: Mutex<Vec<AnnouncementRequest>>,
}

impl FakeWorld {
    pub fn new() -> Self {
        FakeWorld {
            scope: Scope::new(Uuid::new_v4(), Uuid::new_v4()),
            staff: Vec::new(),
            services: Vec::new(),
            customers: Vec::new(),
            admins: Vec::new(),
            slots: HashMap::new(),
            loads: HashMap::new(),
            fail_mutations: false,
            appointments: Mutex::new(Vec::new()),
            shop_holidays: Mutex::new(Vec::new()),
            staff_holidays: Mutex::new(Vec::new()),
            announcements: Mutex::new(Vec::new()),
        }
    }

    pub fn add_staff(&mut self, name: &str, active: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.staff.push(Staff {
            id,
            name: name.to_string(),
            active,
        });
        id
    }

    pub fn add_service(&mut self, name: &str, active: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.services.push(Service {
            id,
            name: name.to_string(),
            duration_min: 30,
            active,
        });
        id
    }

    pub fn add_customer(&mut self, name: &str, email: Option<&str>, phone: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        self.customers.push(Customer {
            id,
            name: name.to_string(),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            active: true,
        });
        id
    }

    pub fn open(&mut self, date: NaiveDate, staff_id: Uuid, times: &[(u32, u32)]) {
        let times = times.iter().map(|(h, m)| t(*h, *m)).collect();
        self.slots.insert((date, staff_id), times);
    }
}

#[async_trait]
impl Directory for FakeWorld {
    async fn list_staff(&self, _scope: Scope) -> Result<Vec<Staff>> {
        Ok(self.staff.clone())
    }

    async fn list_services(&self, _scope: Scope) -> Result<Vec<Service>> {
        Ok(self.services.clone())
    }

    async fn list_customers(&self, _scope: Scope) -> Result<Vec<Customer>> {
        Ok(self.customers.clone())
    }

    async fn find_customer_by_contact(
        &self,
        _scope: Scope,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<Customer>> {
        Ok(self
            .customers
            .iter()
            .find(|c| {
                (email.is_some() && c.email.as_deref() == email)
                    || (phone.is_some() && c.phone.as_deref() == phone)
            })
            .cloned())
    }

    async fn find_admin(&self, _scope: Scope, admin_id: Uuid) -> Result<Option<AdminUser>> {
        Ok(self.admins.iter().find(|a| a.id == admin_id).cloned())
    }
}

#[async_trait]
impl Availability for FakeWorld {
    async fn open_slots(
        &self,
        _scope: Scope,
        date: NaiveDate,
        staff_id: Uuid,
        _service_id: Uuid,
    ) -> Result<Vec<NaiveTime>> {
        Ok(self
            .slots
            .get(&(date, staff_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn weekly_load(
        &self,
        _scope: Scope,
        _staff_ids: &[Uuid],
        _week_start: NaiveDate,
        _week_end: NaiveDate,
    ) -> Result<HashMap<Uuid, u32>> {
        Ok(self.loads.clone())
    }
}

#[async_trait]
impl SchedulingBackend for FakeWorld {
    async fn create_appointment(&self, _scope: Scope, request: &AppointmentRequest) -> Result<()> {
        if self.fail_mutations {
            return Err(TurnoError::Scheduling("backend down".to_string()));
        }
        self.appointments
            .lock()
            .map_err(|_| TurnoError::Scheduling("poisoned".to_string()))?
            .push(request.clone());
        Ok(())
    }

    async fn add_shop_holiday(&self, _scope: Scope, range: DateRange) -> Result<()> {
        if self.fail_mutations {
            return Err(TurnoError::Scheduling("backend down".to_string()));
        }
        self.shop_holidays
            .lock()
            .map_err(|_| TurnoError::Scheduling("poisoned".to_string()))?
            .push(range);
        Ok(())
    }

    async fn add_staff_holiday(
        &self,
        _scope: Scope,
        staff_id: Uuid,
        range: DateRange,
    ) -> Result<()> {
        if self.fail_mutations {
            return Err(TurnoError::Scheduling("backend down".to_string()));
        }
        self.staff_holidays
            .lock()
            .map_err(|_| TurnoError::Scheduling("poisoned".to_string()))?
            .push((staff_id, range));
        Ok(())
    }

    async fn create_announcement(
        &self,
        _scope: Scope,
        request: &AnnouncementRequest,
    ) -> Result<()> {
        if self.fail_mutations {
            return Err(TurnoError::Scheduling("backend down".to_string()));
        }
        self.announcements
            .lock()
            .map_err(|_| TurnoError::Scheduling("poisoned".to_string()))?
            .push(request.clone());
        Ok(())
    }
}

/// Tuesday 2025-06-10, 14:00 local (+02:00).
pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()
}

pub(crate) fn tz() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap()
}

pub(crate) fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub(crate) fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub(crate) fn ctx<'a>(world: &'a FakeWorld, message: &'a str) -> TurnContext<'a> {
    TurnContext {
        scope: world.scope,
        message,
        now: fixed_now(),
        tz: tz(),
        directory: world,
        availability: world,
        backend: world,
    }
}
