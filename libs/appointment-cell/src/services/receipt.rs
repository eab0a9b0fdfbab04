use crate::models::{Booking, CalendarKind, Confirmation};

pub fn confirmation_for(booking: &Booking) -> Confirmation {
    Confirmation {
        booking_id: booking.id,
        booking_type: booking.kind.booking_type().to_string(),
        title: booking.kind.confirmation_title().to_string(),
        status: "Confirmed".to_string(),
        name: booking.name.clone(),
        hospital: booking.hospital.clone(),
        date: booking.date.format("%a %b %d %Y").to_string(),
        time: booking.time.clone(),
        id: booking.resource_id,
        confirmation_code: format!("APT-{}", booking.resource_id),
        specialty: match booking.kind {
            CalendarKind::Doctor => booking.specialty.clone(),
            CalendarKind::Lab => None,
        },
        price: match booking.kind {
            CalendarKind::Lab => booking.price.clone(),
            CalendarKind::Doctor => None,
        },
    }
}

/// e.g. `HospiGo-lab-test-3.txt`
pub fn receipt_file_name(confirmation: &Confirmation) -> String {
    let kind = confirmation
        .booking_type
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("HospiGo-{}-{}.txt", kind, confirmation.id)
}

pub fn receipt_text(confirmation: &Confirmation) -> String {
    format!(
        "HospiGo {} Confirmation\n\n\
         Test/Appointment: {}\n\
         Hospital: {}\n\
         Date: {}\n\
         Time: {}\n\
         Confirmation ID: #{}\n\n\
         Thank you for choosing HospiGo!\n",
        confirmation.booking_type,
        confirmation.name,
        confirmation.hospital,
        confirmation.date,
        confirmation.time,
        confirmation.id,
    )
}
