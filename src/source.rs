use std::{fs::File, io::BufReader, path::Path};

use chrono::{NaiveDate, NaiveDateTime};
use grib::{FixedSurface, Grib2, SeekableGrib2Reader, SubMessage};

use crate::{
    criteria::Level,
    error::ExtractError,
    record::{GridArchive, GridRecord, RecordFile, RecordHeader, RecordIter},
};

type Reader = SeekableGrib2Reader<BufReader<File>>;

/// Code table 4.5: isobaric surface, in Pa.
const ISOBARIC_SURFACE: u8 = 100;

/// Reads archive files as GRIB2 data.
#[derive(Debug, Default, Clone, Copy)]
pub struct GribArchive;

impl GridArchive for GribArchive {
    type File = GribFile;

    fn open(&self, path: &Path) -> Result<Self::File, ExtractError> {
        GribFile::open(path)
    }
}

pub struct GribFile {
    grib2: Grib2<Reader>,
}

impl GribFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let read_error = |e: &dyn std::fmt::Display| {
            ExtractError::ReadError(format!("{}: {e}", path.display()))
        };
        let f = File::open(path).map_err(|e| read_error(&e))?;
        let f = BufReader::new(f);
        let grib2 = grib::from_reader(f).map_err(|e| read_error(&e))?;
        if grib2.is_empty() {
            return Err(read_error(&"no GRIB2 message found"));
        }
        Ok(Self { grib2 })
    }

    /// Iterates over the headers of all submessages without decoding any
    /// grid.
    pub fn headers(&self) -> impl Iterator<Item = Result<RecordHeader, ExtractError>> + '_ {
        self.grib2
            .iter()
            .map(|(_index, submessage)| header_of(&submessage))
    }
}

impl RecordFile for GribFile {
    fn records<'a>(&'a self, select: &'a dyn Fn(&RecordHeader) -> bool) -> RecordIter<'a> {
        let iter = self.grib2.iter().filter_map(move |(index, submessage)| {
            let header = match header_of(&submessage) {
                Ok(header) => header,
                Err(e) => return Some(Err(e)),
            };
            if !select(&header) {
                return None;
            }
            log::debug!(
                "decoding submessage {}.{}: {} at {:?}",
                index.0,
                index.1,
                header.short_name,
                header.level
            );
            Some(decode(header, submessage))
        });
        Box::new(iter)
    }
}

fn header_of(submessage: &SubMessage<'_, Reader>) -> Result<RecordHeader, ExtractError> {
    let discipline = submessage.indicator().discipline;
    let prod_def = submessage.prod_def();
    let short_name = match (prod_def.parameter_category(), prod_def.parameter_number()) {
        (Some(category), Some(number)) => short_name(discipline, category, number),
        _ => format!("{discipline}.?.?"),
    };
    let level = prod_def
        .fixed_surfaces()
        .and_then(|(first, _second)| isobaric_level(&first));
    let timestamp = reference_time(submessage)?;
    Ok(RecordHeader::new(short_name, level, timestamp))
}

fn decode(
    header: RecordHeader,
    submessage: SubMessage<'_, Reader>,
) -> Result<GridRecord, ExtractError> {
    let shape = submessage.grid_shape()?;
    let (lats, lons) = submessage
        .latlons()?
        .map(|(lat, lon)| (f64::from(lat), f64::from(lon)))
        .unzip();
    let decoder = grib::Grib2SubmessageDecoder::from(submessage)?;
    let values = decoder.dispatch()?.map(f64::from).collect();
    GridRecord::new(header, shape, lats, lons, values)
}

fn reference_time(submessage: &SubMessage<'_, Reader>) -> Result<NaiveDateTime, ExtractError> {
    let time = submessage.temporal_raw_info().ref_time_unchecked;
    NaiveDate::from_ymd_opt(time.year.into(), time.month.into(), time.day.into())
        .and_then(|date| {
            date.and_hms_opt(time.hour.into(), time.minute.into(), time.second.into())
        })
        .ok_or_else(|| ExtractError::ReadError(format!("invalid reference time: {time}")))
}

fn isobaric_level(surface: &FixedSurface) -> Option<Level> {
    if surface.surface_type != ISOBARIC_SURFACE || surface.value_is_nan() {
        return None;
    }
    let hpa = (surface.value() / 100.).round();
    (hpa >= 0.).then_some(Level(hpa as u32))
}

/// Maps a GRIB2 parameter to its conventional short name.
///
/// Parameters without one are named `<discipline>.<category>.<number>`.
pub fn short_name(discipline: u8, category: u8, number: u8) -> String {
    let name = match (discipline, category, number) {
        (0, 0, 0) => "t",
        (0, 1, 0) => "q",
        (0, 1, 1) => "r",
        (0, 1, 22) => "clwmr",
        (0, 2, 2) => "u",
        (0, 2, 3) => "v",
        (0, 2, 8) => "w",
        (0, 2, 10) => "absv",
        (0, 3, 0) => "pres",
        (0, 3, 1) => "prmsl",
        (0, 3, 5) => "gh",
        (0, 14, 192) => "o3mr",
        _ => return format!("{discipline}.{category}.{number}"),
    };
    name.to_owned()
}
