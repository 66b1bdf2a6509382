pub mod appointment;
pub mod billing;
pub mod serde_thing;
pub mod spa_package;
pub mod spa_room;
pub mod spa_service;
pub mod therapist;

pub use appointment::{
    AppointmentCreate, AppointmentDetail, AppointmentId, AppointmentStatus, AppointmentUpdate,
    PaymentStatus, SpaAppointment,
};
pub use billing::{
    BillingCreate, BillingDetail, BillingItem, BillingUpdate, PaymentMethod, SpaBilling,
    SpaBillingId,
};
pub use spa_package::{
    DiscountType, PackageServiceLine, PackageServiceLineInput, PackageType, SpaPackage,
    SpaPackageCreate, SpaPackageId, SpaPackageUpdate,
};
pub use spa_room::{SpaRoom, SpaRoomCreate, SpaRoomId, SpaRoomStatus, SpaRoomType, SpaRoomUpdate};
pub use spa_service::{
    ServiceCategory, SpaService, SpaServiceCreate, SpaServiceId, SpaServiceUpdate,
};
pub use therapist::{
    Certification, DayAvailability, Therapist, TherapistCreate, TherapistId, TherapistUpdate,
    WeeklyAvailability,
};
