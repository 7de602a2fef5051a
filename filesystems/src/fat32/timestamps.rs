// FAT timestamp handling
// Packed MS-DOS format: date = (year - 1980) << 9 | month << 5 | day,
// time = hour << 11 | minute << 5 | second / 2

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

/// Encode a datetime into the packed FAT (date, time) pair. Years outside
/// the representable 1980..=2107 window are clamped.
pub fn encode_datetime<T: Datelike + Timelike>(dt: &T) -> (u16, u16) {
    let year = dt.year().clamp(1980, 2107);
    let date = (((year - 1980) as u16) << 9) | ((dt.month() as u16) << 5) | dt.day() as u16;
    let time =
        ((dt.hour() as u16) << 11) | ((dt.minute() as u16) << 5) | (dt.second() as u16 / 2);
    (date, time)
}

/// Current wall-clock time, packed.
pub fn now() -> (u16, u16) {
    encode_datetime(&Local::now())
}

/// Unpack a FAT (date, time) pair. Returns None for field values that do not
/// name a real calendar date.
pub fn decode_datetime(date: u16, time: u16) -> Option<NaiveDateTime> {
    let year = ((date >> 9) & 0x7F) as i32 + 1980;
    let month = ((date >> 5) & 0x0F) as u32;
    let day = (date & 0x1F) as u32;
    let hour = ((time >> 11) & 0x1F) as u32;
    let minute = ((time >> 5) & 0x3F) as u32;
    let second = ((time & 0x1F) * 2) as u32;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}
