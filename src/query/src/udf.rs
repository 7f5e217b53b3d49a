use std::any::Any;
use std::sync::Arc;

use arrow::array::Array;
use arrow::array::ArrayRef;
use arrow::array::StringArray;
use arrow::array::StringBuilder;
use arrow::compute::cast;
use arrow::datatypes::DataType;
use datafusion::prelude::SessionContext;
use datafusion_common::cast::as_int64_array;
use datafusion_common::cast::as_string_array;
use datafusion_common::ScalarValue;
use datafusion_expr::ColumnarValue;
use datafusion_expr::Expr;
use datafusion_expr::ScalarUDF;
use datafusion_expr::ScalarUDFImpl;
use datafusion_expr::Signature;
use datafusion_expr::Volatility;
use geoip::function;
use geoip::ArgType;
use geoip::GeoIpError;
use geoip::GeoIpFunction;
use geoip::IpInput;
use geoip::IpKind;
use tracing::debug;

use crate::error::Result;

pub fn arg_type(dt: &DataType) -> ArgType {
    match dt {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Null => ArgType::Text,
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => ArgType::Integer,
        other => ArgType::Other(other.to_string()),
    }
}

pub fn validate_types(arg_types: &[DataType]) -> Result<IpKind> {
    let types = arg_types.iter().map(arg_type).collect::<Vec<_>>();
    Ok(geoip::validate(&types)?)
}

/// `geoip(ip, property, database)` scalar function. Every registered
/// instance owns its own database handle.
#[derive(Debug)]
pub struct GeoIpUdf {
    signature: Signature,
    function: GeoIpFunction,
}

impl GeoIpUdf {
    pub fn new(function: GeoIpFunction) -> Self {
        Self {
            // arity and types are checked in return_type so planning fails
            // with the function's own errors
            signature: Signature::variadic_any(Volatility::Volatile),
            function,
        }
    }

    pub fn maxmind() -> Self {
        Self::new(GeoIpFunction::maxmind())
    }

    pub fn function(&self) -> &GeoIpFunction {
        &self.function
    }

    fn evaluate(&self, args: &[ColumnarValue]) -> Result<ColumnarValue> {
        // types were checked when planning, only the address kind is needed here
        let [ip, prop, db] = args else {
            return Err(GeoIpError::ArgumentCount(args.len()).into());
        };
        let kind = arg_type(&ip.data_type()).ip_kind()?;

        let len = args.iter().find_map(|arg| match arg {
            ColumnarValue::Array(arr) => Some(arr.len()),
            ColumnarValue::Scalar(_) => None,
        });
        let is_scalar = len.is_none();
        let len = len.unwrap_or(1);

        let ips = ip.clone().into_array(len)?;
        let props = cast(&prop.clone().into_array(len)?, &DataType::Utf8)?;
        let props = as_string_array(props.as_ref())?;
        let dbs = cast(&db.clone().into_array(len)?, &DataType::Utf8)?;
        let dbs = as_string_array(dbs.as_ref())?;

        let mut out = StringBuilder::with_capacity(len, len * 16);
        match kind {
            IpKind::Text => {
                let ips = cast(&ips, &DataType::Utf8)?;
                let ips = as_string_array(ips.as_ref())?;
                for row in 0..len {
                    let ip = ips.is_valid(row).then(|| IpInput::Text(ips.value(row)));
                    out.append_option(self.evaluate_row(ip, props, dbs, row)?);
                }
            }
            IpKind::Integer => {
                let ips = cast(&ips, &DataType::Int64)?;
                let ips = as_int64_array(ips.as_ref())?;
                for row in 0..len {
                    let ip = ips.is_valid(row).then(|| IpInput::Integer(ips.value(row)));
                    out.append_option(self.evaluate_row(ip, props, dbs, row)?);
                }
            }
        }

        let res = Arc::new(out.finish()) as ArrayRef;
        if is_scalar {
            Ok(ColumnarValue::Scalar(ScalarValue::try_from_array(
                res.as_ref(),
                0,
            )?))
        } else {
            Ok(ColumnarValue::Array(res))
        }
    }

    fn evaluate_row(
        &self,
        ip: Option<IpInput>,
        props: &StringArray,
        dbs: &StringArray,
        row: usize,
    ) -> Result<Option<String>> {
        let prop = props.is_valid(row).then(|| props.value(row));
        let res = self.function.evaluate(ip, prop, || {
            dbs.is_valid(row).then(|| dbs.value(row).to_string())
        })?;

        Ok(res)
    }
}

impl ScalarUDFImpl for GeoIpUdf {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &str {
        function::NAME
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn display_name(&self, args: &[Expr]) -> datafusion_common::Result<String> {
        let children = args
            .iter()
            .map(|arg| arg.display_name())
            .collect::<datafusion_common::Result<Vec<_>>>()?;

        Ok(function::display_string(&children))
    }

    fn return_type(&self, arg_types: &[DataType]) -> datafusion_common::Result<DataType> {
        let kind = validate_types(arg_types).map_err(|err| err.into_datafusion_plan_error())?;
        debug!("planned {} with {kind} address", function::NAME);

        Ok(DataType::Utf8)
    }

    fn invoke(&self, args: &[ColumnarValue]) -> datafusion_common::Result<ColumnarValue> {
        self.evaluate(args)
            .map_err(|err| err.into_datafusion_execution_error())
    }
}

/// Registers `udf` under its name, replacing a previous registration.
pub fn register(ctx: &SessionContext, udf: GeoIpUdf) {
    ctx.register_udf(ScalarUDF::new_from_impl(udf));
}
