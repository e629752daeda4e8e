//! Binary decoder for course files.
//!
//! A course file is a small header, fifteen section offsets, and the
//! sections themselves. Offsets are relative to the end of the header
//! and every multi-byte value is big-endian. Decoding is strict about
//! structure (magic, section tags, record bounds) but tolerant of odd
//! header values, which real custom tracks do ship with.

use log::{debug, warn};

use crate::error::{FormatError, Result};
use crate::layer::assign_layers;
use crate::reader::ByteReader;
use crate::sections::{
    Area, Came, Ckph, Ckpt, Cnpt, Enpt, Gobj, Header, Itpt, Jgpt, Kmp, Ktpt, Mspt, PathGroup,
    PotiPoint, PotiRoute, Section, Stgi,
};

/// Course file magic.
pub const KMP_MAGIC: [u8; 4] = *b"RKMD";

/// Number of section offsets in the header.
const SECTION_COUNT: usize = 15;

/// Decode a complete course file.
///
/// All fifteen sections are parsed even when a caller only cares about
/// checkpoints; sections are tiny and later passes may want any of
/// them. Checkpoint group layers are assigned before returning, so the
/// result is ready for analysis as-is.
pub fn decode(data: &[u8]) -> Result<Kmp> {
    let mut r = ByteReader::new(data);
    let magic = r.read_tag("file magic")?;
    if magic != KMP_MAGIC {
        return Err(FormatError::bad_magic(&KMP_MAGIC, &magic));
    }
    let file_len = r.read_u32("file length")?;
    let section_count = r.read_u16("section count")?;
    let header_len = r.read_u16("header length")?;
    let version = r.read_u32("format version")?;

    if usize::from(section_count) != SECTION_COUNT {
        warn!("header declares {section_count} sections, expected {SECTION_COUNT}");
    }
    if file_len as usize != data.len() {
        debug!(
            "header says {file_len} bytes, input has {}; trusting the input",
            data.len()
        );
    }

    let mut offsets = [0u32; SECTION_COUNT];
    for slot in offsets.iter_mut() {
        *slot = r.read_u32("section offset")?;
    }

    let header = Header {
        file_len,
        section_count,
        header_len,
        version,
    };

    let ktpt = section(data, header_len, offsets[0], "KTPT", |r, idx| {
        let pos = r.read_vec3("start position")?;
        let rot = r.read_vec3("start rotation")?;
        let player_id = r.read_u16("start player id")?;
        r.skip(2, "start padding")?;
        Ok(Ktpt {
            idx,
            pos,
            rot,
            player_id,
        })
    })?;

    let enpt = section(data, header_len, offsets[1], "ENPT", |r, idx| {
        let pos = r.read_vec3("enemy point position")?;
        let variance = r.read_f32("enemy point variance")?;
        let s1 = r.read_u16("enemy point setting 1")?;
        let s2 = r.read_u8("enemy point setting 2")?;
        let s3 = r.read_u8("enemy point setting 3")?;
        Ok(Enpt {
            idx,
            pos,
            variance,
            s1,
            s2,
            s3,
        })
    })?;

    let enph = section(data, header_len, offsets[2], "ENPH", path_group)?;

    let itpt = section(data, header_len, offsets[3], "ITPT", |r, idx| {
        let pos = r.read_vec3("item point position")?;
        let variance = r.read_f32("item point variance")?;
        let s1 = r.read_u16("item point setting 1")?;
        let s2 = r.read_u16("item point setting 2")?;
        Ok(Itpt {
            idx,
            pos,
            variance,
            s1,
            s2,
        })
    })?;

    let itph = section(data, header_len, offsets[4], "ITPH", path_group)?;

    let ckpt = section(data, header_len, offsets[5], "CKPT", |r, idx| {
        let p1 = r.read_vec2("checkpoint endpoint 1")?;
        let p2 = r.read_vec2("checkpoint endpoint 2")?;
        let res = r.read_u8("checkpoint respawn")?;
        let kind = r.read_u8("checkpoint kind")?;
        let prev = r.read_u8("checkpoint prev link")?;
        let next = r.read_u8("checkpoint next link")?;
        Ok(Ckpt {
            idx,
            p1,
            p2,
            res,
            kind,
            prev,
            next,
        })
    })?;

    let mut ckph = section(data, header_len, offsets[6], "CKPH", |r, gidx| {
        let start = r.read_u8("group start")?;
        let len = r.read_u8("group length")?;
        let prev = r.read_bytes::<6>("group prev links")?;
        let next = r.read_bytes::<6>("group next links")?;
        r.skip(2, "group padding")?;
        Ok(Ckph {
            gidx,
            start,
            len,
            prev,
            next,
            layer: -1,
        })
    })?;
    assign_layers(&mut ckph.entries);

    let gobj = section(data, header_len, offsets[7], "GOBJ", |r, idx| {
        let id = r.read_u16("object id")?;
        let xpf_id = r.read_u16("object extended id")?;
        let pos = r.read_vec3("object position")?;
        let rot = r.read_vec3("object rotation")?;
        let scale = r.read_vec3("object scale")?;
        let route = r.read_u16("object route")?;
        let settings = r.read_u16s::<8>("object settings")?;
        let presence = r.read_u16("object presence flags")?;
        Ok(Gobj {
            idx,
            id,
            xpf_id,
            pos,
            rot,
            scale,
            route,
            settings,
            presence,
        })
    })?;

    let poti = section(data, header_len, offsets[8], "POTI", |r, idx| {
        let count = usize::from(r.read_u16("route point count")?);
        let smooth = r.read_u8("route smoothing")?;
        let motion_type = r.read_u8("route motion type")?;
        let mut points = Vec::with_capacity(count);
        for pidx in 0..count {
            let pos = r.read_vec3("route point position")?;
            let s1 = r.read_u16("route point setting 1")?;
            let s2 = r.read_u16("route point setting 2")?;
            points.push(PotiPoint {
                idx: pidx,
                pos,
                s1,
                s2,
            });
        }
        Ok(PotiRoute {
            idx,
            smooth,
            motion_type,
            points,
        })
    })?;

    let area = section(data, header_len, offsets[9], "AREA", |r, idx| {
        let shape = r.read_u8("area shape")?;
        let kind = r.read_u8("area kind")?;
        let camera = r.read_u8("area camera")?;
        let priority = r.read_u8("area priority")?;
        let pos = r.read_vec3("area position")?;
        let rot = r.read_vec3("area rotation")?;
        let scale = r.read_vec3("area scale")?;
        let s1 = r.read_u16("area setting 1")?;
        let s2 = r.read_u16("area setting 2")?;
        let route = r.read_u8("area route")?;
        let enpt = r.read_u8("area enemy point")?;
        r.skip(2, "area padding")?;
        Ok(Area {
            idx,
            shape,
            kind,
            camera,
            priority,
            pos,
            rot,
            scale,
            s1,
            s2,
            route,
            enpt,
        })
    })?;

    let came = section(data, header_len, offsets[10], "CAME", |r, idx| {
        let kind = r.read_u8("camera kind")?;
        let next = r.read_u8("camera next")?;
        let shake = r.read_u8("camera shake")?;
        let route = r.read_u8("camera route")?;
        let point_speed = r.read_u16("camera point speed")?;
        let zoom_speed = r.read_u16("camera zoom speed")?;
        let view_speed = r.read_u16("camera view speed")?;
        let start = r.read_u8("camera start flag")?;
        let movie = r.read_u8("camera movie flag")?;
        let pos = r.read_vec3("camera position")?;
        let rot = r.read_vec3("camera rotation")?;
        let zoom_start = r.read_f32("camera zoom start")?;
        let zoom_end = r.read_f32("camera zoom end")?;
        let view_start = r.read_vec3("camera view start")?;
        let view_end = r.read_vec3("camera view end")?;
        let time = r.read_f32("camera time")?;
        Ok(Came {
            idx,
            kind,
            next,
            shake,
            route,
            point_speed,
            zoom_speed,
            view_speed,
            start,
            movie,
            pos,
            rot,
            zoom_start,
            zoom_end,
            view_start,
            view_end,
            time,
        })
    })?;

    let jgpt = section(data, header_len, offsets[11], "JGPT", |r, idx| {
        let pos = r.read_vec3("respawn position")?;
        let rot = r.read_vec3("respawn rotation")?;
        let id = r.read_u16("respawn id")?;
        let range = r.read_u16("respawn range")?;
        Ok(Jgpt {
            idx,
            pos,
            rot,
            id,
            range,
        })
    })?;

    let cnpt = section(data, header_len, offsets[12], "CNPT", |r, idx| {
        let pos = r.read_vec3("cannon position")?;
        let rot = r.read_vec3("cannon rotation")?;
        let id = r.read_u16("cannon id")?;
        let effect = r.read_u16("cannon effect")?;
        Ok(Cnpt {
            idx,
            pos,
            rot,
            id,
            effect,
        })
    })?;

    let mspt = section(data, header_len, offsets[13], "MSPT", |r, idx| {
        let pos = r.read_vec3("end position")?;
        let rot = r.read_vec3("end rotation")?;
        let id = r.read_u16("end position id")?;
        r.skip(2, "end position padding")?;
        Ok(Mspt { idx, pos, rot, id })
    })?;

    let stgi = section(data, header_len, offsets[14], "STGI", |r, idx| {
        let laps = r.read_u8("stage laps")?;
        let pole_position = r.read_u8("stage pole position")?;
        let narrow = r.read_u8("stage narrow flag")?;
        let lens_flare = r.read_u8("stage lens flare flag")?;
        r.skip(1, "stage padding")?;
        let flare_color = r.read_bytes::<4>("stage flare color")?;
        r.skip(1, "stage padding")?;
        let speed_mod = r.read_f16("stage speed modifier")?;
        Ok(Stgi {
            idx,
            laps,
            pole_position,
            narrow,
            lens_flare,
            flare_color,
            speed_mod,
        })
    })?;

    Ok(Kmp {
        header,
        ktpt,
        enpt,
        enph,
        itpt,
        itph,
        ckpt,
        ckph,
        gobj,
        poti,
        area,
        came,
        jgpt,
        cnpt,
        mspt,
        stgi,
    })
}

/// ENPH and ITPH share one record layout.
fn path_group(r: &mut ByteReader<'_>, gidx: usize) -> Result<PathGroup> {
    let start = r.read_u8("group start")?;
    let len = r.read_u8("group length")?;
    let prev = r.read_bytes::<6>("group prev links")?;
    let next = r.read_bytes::<6>("group next links")?;
    r.skip(2, "group padding")?;
    Ok(PathGroup {
        gidx,
        start,
        len,
        prev,
        next,
    })
}

/// Parse one section: verify its tag, then run `entry` once per record.
fn section<T>(
    data: &[u8],
    header_len: u16,
    offset: u32,
    tag: &'static str,
    mut entry: impl FnMut(&mut ByteReader<'_>, usize) -> Result<T>,
) -> Result<Section<T>> {
    let at = usize::from(header_len) + offset as usize;
    if at >= data.len() {
        return Err(FormatError::OffsetOutOfBounds {
            tag,
            offset,
            file_len: data.len(),
        });
    }
    let mut r = ByteReader::new(data);
    r.seek(at, tag)?;
    let found = r.read_tag(tag)?;
    if &found[..] != tag.as_bytes() {
        return Err(FormatError::bad_magic(tag.as_bytes(), &found));
    }
    let count = usize::from(r.read_u16(tag)?);
    let additional = r.read_u16(tag)?;
    let mut entries = Vec::with_capacity(count);
    for idx in 0..count {
        entries.push(entry(&mut r, idx)?);
    }
    Ok(Section { additional, entries })
}
