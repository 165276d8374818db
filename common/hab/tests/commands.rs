// Licensed under the Apache-2.0 license

//! End-to-end tests for HAB command records.
//!
//! Builds the commands found in a typical signed image CSF, exports them back
//! to back, and parses the sequence again through `Command` dispatch.

use hab_common::{
    Algorithm, AuthDataCmd, AuthFlag, ByteWidth, CheckDataCmd, CheckOp, CmdTag, Command,
    ConfigItem, Engine, HabCodec, HabError, InitializeCmd, InsKeyFlag, InsKeyFlags,
    InstallKeyCmd, NopCmd, Protocol, SetCmd, UnlockCmd, WriteDataCmd, WriteOp, HEADER_SIZE,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;

fn init_logger() {
    let _ = SimpleLogger::new().with_level(LevelFilter::Trace).init();
}

fn sample_commands() -> Vec<Command> {
    let mut write = WriteDataCmd::new(ByteWidth::Bytes4, WriteOp::WriteValue);
    write.append(0x020C_4068, 0xFFFF_FFFF).unwrap();
    write.append(0x020C_406C, 0xFFFF_FFFF).unwrap();

    let mut check = CheckDataCmd::new(ByteWidth::Bytes4, CheckOp::AllClear);
    check.append(0x021B_0018, 0x0000_0001).unwrap();

    let mut set = SetCmd::new(ConfigItem::Eng);
    set.append(Algorithm::Sha256, Engine::Dcp, 0).unwrap();

    let init = InitializeCmd::with_values(Engine::Srtc, &[0]).unwrap();
    let unlock = UnlockCmd::with_values(Engine::Caam, &[0x0000_0003]).unwrap();

    let srk = InstallKeyCmd::new(
        InsKeyFlags::default(),
        Protocol::Srk,
        Algorithm::Sha256,
        0,
        1,
        0x0090_0000,
    );
    let csfk = InstallKeyCmd::new(
        InsKeyFlags::from_flags(&[InsKeyFlag::Csf]),
        Protocol::X509,
        Algorithm::Any,
        1,
        1,
        0x0090_0800,
    );

    let mut auth = AuthDataCmd::new(AuthFlag::Clr, 1, Protocol::Cms, Engine::Any, 0, 0x0090_1000);
    auth.append(0x0000_1000, 0x200).unwrap();
    auth.append(0x0000_2000, 0x400).unwrap();

    vec![
        write.into(),
        check.into(),
        NopCmd::default().into(),
        set.into(),
        init.into(),
        unlock.into(),
        srk.into(),
        csfk.into(),
        auth.into(),
    ]
}

#[test]
fn test_write_data_scenario() {
    init_logger();
    let mut cmd = WriteDataCmd::new(ByteWidth::Bytes4, WriteOp::WriteValue);
    cmd.append(0x0000_0010, 0xDEAD_BEEF).unwrap();
    assert_eq!(cmd.export(), hex::decode("cc000c0400000010deadbeef").unwrap());
}

#[test]
fn test_install_key_scenario() {
    init_logger();
    let cmd = InstallKeyCmd::new(
        InsKeyFlags::default(),
        Protocol::Srk,
        Algorithm::Sha256,
        0,
        1,
        0x0090_0000,
    );
    let bytes = cmd.export();
    assert_eq!(hex::encode(&bytes[HEADER_SIZE..HEADER_SIZE + 8]), "0317000100900000");
}

#[test]
fn test_auth_data_scenario() {
    init_logger();
    let mut cmd = AuthDataCmd::default();
    cmd.append(0x0000_1000, 0x200).unwrap();
    cmd.append(0x0000_2000, 0x400).unwrap();
    let bytes = cmd.export();
    assert_eq!(
        hex::encode(&bytes[HEADER_SIZE + 8..]),
        "00001000000002000000200000000400"
    );
}

#[test]
fn test_round_trip_every_variant() {
    init_logger();
    for cmd in sample_commands() {
        let bytes = cmd.export();
        assert_eq!(bytes.len(), cmd.size());
        assert_eq!(usize::from(cmd.header().length()), bytes.len());
        assert_eq!(Command::parse(&bytes, 0), Ok(cmd));
    }
}

#[test]
fn test_sequence_parse() {
    init_logger();
    let commands = sample_commands();
    let buffer: Vec<u8> = commands.iter().flat_map(|cmd| cmd.export()).collect();

    let mut offset = 0;
    let mut parsed = Vec::new();
    while offset < buffer.len() {
        let cmd = Command::parse(&buffer, offset).unwrap();
        offset += cmd.size();
        parsed.push(cmd);
    }
    assert_eq!(offset, buffer.len());
    assert_eq!(parsed, commands);

    let tags: Vec<CmdTag> = parsed.iter().map(Command::tag).collect();
    assert_eq!(
        tags,
        [
            CmdTag::WriteData,
            CmdTag::CheckData,
            CmdTag::Nop,
            CmdTag::Set,
            CmdTag::Initialize,
            CmdTag::Unlock,
            CmdTag::InstallKey,
            CmdTag::InstallKey,
            CmdTag::AuthData,
        ]
    );
}

#[test]
fn test_length_invariant_after_mutation() {
    init_logger();
    let mut cmd = WriteDataCmd::default();
    for i in 0..10u32 {
        cmd.append(0x1000 + i * 4, i).unwrap();
    }
    cmd.pop(3).unwrap();
    cmd.pop(0).unwrap();
    assert_eq!(cmd.size(), HEADER_SIZE + cmd.len() * 8);
    assert_eq!(cmd.export().len(), cmd.size());

    cmd.clear();
    assert_eq!(cmd.size(), HEADER_SIZE);
    assert_eq!(cmd.export(), hex::decode("cc000404").unwrap());
}

#[test]
fn test_truncated_sequence() {
    init_logger();
    let mut buffer = Vec::new();
    for cmd in sample_commands() {
        cmd.write_to(&mut buffer);
    }
    buffer.truncate(buffer.len() - 4);

    let mut offset = 0;
    let err = loop {
        match Command::parse(&buffer, offset) {
            Ok(cmd) => offset += cmd.size(),
            Err(err) => break err,
        }
    };
    assert!(matches!(err, HabError::TruncatedBuffer { .. }));
}

#[test]
fn test_domain_rejection_keeps_state() {
    init_logger();
    let mut write = WriteDataCmd::new(ByteWidth::Bytes2, WriteOp::SetBitmask);
    write.append(0x0209_8000, 0x0000_0001).unwrap();
    write.append(0x0209_8004, 0x0000_0002).unwrap();
    let before = write.clone();

    let err = ByteWidth::try_from(3)
        .map(|width| write.set_byte_width(width))
        .unwrap_err();
    assert_eq!(
        err,
        HabError::InvalidValue {
            field: "byte width",
            value: 3
        }
    );
    let err = WriteOp::try_from(7)
        .map(|ops| write.set_ops(ops))
        .unwrap_err();
    assert!(matches!(err, HabError::InvalidValue { .. }));
    assert_eq!(write.header().param(), 0x1A);
    assert_eq!(write.size(), 20);
    assert_eq!(write.items(), before.items());
    assert_eq!(write.export(), before.export());

    let mut set = SetCmd::new(ConfigItem::Eng);
    set.append(Algorithm::Sha256, Engine::Dcp, 0).unwrap();
    let before = set.clone();

    let err = Algorithm::try_from(0x99)
        .and_then(|alg| set.append(alg, Engine::Any, 0))
        .unwrap_err();
    assert_eq!(
        err,
        HabError::InvalidValue {
            field: "algorithm",
            value: 0x99
        }
    );
    let err = Engine::try_from(0x42)
        .and_then(|eng| set.append(Algorithm::Any, eng, 0))
        .unwrap_err();
    assert!(matches!(err, HabError::InvalidValue { .. }));
    let err = ConfigItem::try_from(0x02)
        .map(|item| set.set_item(item))
        .unwrap_err();
    assert!(matches!(err, HabError::InvalidValue { .. }));
    assert_eq!(set.header().param(), 0x03);
    assert_eq!(set.header().length(), 8);
    assert_eq!(set.entries(), before.entries());
    assert_eq!(set, before);
}

#[test]
fn test_display_listing() {
    init_logger();
    let listing: String = sample_commands().iter().map(|cmd| cmd.to_string()).collect();
    assert!(listing.contains("Write Data Command (Ops: WRITE_VALUE, Bytes: 4)"));
    assert!(listing.contains("Check Data Command (Ops: ALL_CLEAR, Bytes: 4)"));
    assert!(listing.contains("Set Command (ITM: HAB_VAR_CFG_ITM_ENG)"));
    assert!(listing.contains("- ALG: HAB_ALG_SHA256, ENG: HAB_ENG_DCP, CFG: 0"));
    assert!(listing.contains("Initialize Command (Engine: HAB_ENG_SRTC)"));
    assert!(listing.contains(" Flag:   HAB_CMD_INS_KEY_CSF"));
    assert!(listing.contains("- Start: 0x00002000, Length: 1024 Bytes"));
}
