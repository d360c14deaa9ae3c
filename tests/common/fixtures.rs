use chrono::NaiveDateTime;
use soap_xml_mapper::core::definition::{DefinitionBuilder, XmlObject};

/// Customers and orders of the Northwind sample, wrapped in a SOAP envelope.
///
/// Order 10 carries a non-numeric `EmployeeID`; order 11 has no shipped date.
pub const CUSTOMERS_AND_ORDERS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <Root xmlns="http://www.adventure-works.com">
      <!-- Northwind sample -->
      <Customers>
        <Customer CustomerID="GREAL">
          <CompanyName>Great Lakes Food Market</CompanyName>
          <ContactName>Howard Snyder</ContactName>
          <ContactTitle>Marketing Manager</ContactTitle>
          <Phone>(503) 555-7555</Phone>
          <FullAddress>
            <Address>2732 Baker Blvd.</Address>
            <City>Eugene</City>
            <Region>OR</Region>
            <PostalCode>97403</PostalCode>
            <Country>USA</Country>
          </FullAddress>
        </Customer>
        <Customer CustomerID="HUNGC">
          <CompanyName>Hungry Coyote Import Store</CompanyName>
          <ContactName>Yoshi Latimer</ContactName>
          <ContactTitle>Sales Representative</ContactTitle>
          <Phone>(503) 555-6874</Phone>
          <Fax>(503) 555-2376</Fax>
          <FullAddress>
            <Address>City Center Plaza 516 Main St.</Address>
            <City>Elgin</City>
            <Region>OR</Region>
            <PostalCode>97827</PostalCode>
            <Country>USA</Country>
          </FullAddress>
        </Customer>
        <Customer CustomerID="LAZYK">
          <CompanyName>Lazy K Kountry Store</CompanyName>
          <ContactName>John Steel</ContactName>
          <ContactTitle>Marketing Manager</ContactTitle>
          <Phone>(509) 555-7969</Phone>
          <Fax>(509) 555-6221</Fax>
          <FullAddress>
            <Address>12 Orchestra Terrace</Address>
            <City>Walla Walla</City>
            <Region>WA</Region>
            <PostalCode>99362</PostalCode>
            <Country>USA</Country>
          </FullAddress>
        </Customer>
        <Customer CustomerID="LETSS">
          <CompanyName>Let&apos;s Stop N Shop</CompanyName>
          <ContactName>Jaime Yorres</ContactName>
          <ContactTitle>Owner</ContactTitle>
          <Phone>(415) 555-5938</Phone>
          <FullAddress>
            <Address>87 Polk St. Suite 5</Address>
            <City>San Francisco</City>
            <Region>CA</Region>
            <PostalCode>94117</PostalCode>
            <Country>USA</Country>
          </FullAddress>
        </Customer>
      </Customers>
      <Orders>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>6</EmployeeID>
          <OrderDate>1997-05-06T00:00:00</OrderDate>
          <RequiredDate>1997-05-20T00:00:00</RequiredDate>
          <ShipInfo ShippedDate="1997-05-09T00:00:00">
            <ShipVia>2</ShipVia>
            <Freight>3.35</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>4</EmployeeID>
          <OrderDate>1997-07-04T00:00:00</OrderDate>
          <RequiredDate>1997-08-01T00:00:00</RequiredDate>
          <ShipInfo ShippedDate="1997-07-14T00:00:00">
            <ShipVia>2</ShipVia>
            <Freight>4.42</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>1</EmployeeID>
          <OrderDate>1997-07-31T00:00:00</OrderDate>
          <RequiredDate>1997-08-28T00:00:00</RequiredDate>
          <ShipInfo ShippedDate="1997-08-05T00:00:00">
            <ShipVia>2</ShipVia>
            <Freight>116.53</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>4</EmployeeID>
          <OrderDate>1997-07-31T00:00:00</OrderDate>
          <RequiredDate>1997-08-28T00:00:00</RequiredDate>
          <ShipInfo ShippedDate="1997-08-04T00:00:00">
            <ShipVia>2</ShipVia>
            <Freight>18.53</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>6</EmployeeID>
          <OrderDate>1997-09-04T00:00:00</OrderDate>
          <RequiredDate>1997-10-02T00:00:00</RequiredDate>
          <ShipInfo ShippedDate="1997-09-10T00:00:00">
            <ShipVia>1</ShipVia>
            <Freight>57.15</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>3</EmployeeID>
          <OrderDate>1997-09-17T00:00:00</OrderDate>
          <RequiredDate>1997-10-15T00:00:00</RequiredDate>
          <ShipInfo ShippedDate="1997-09-22T00:00:00">
            <ShipVia>3</ShipVia>
            <Freight>76.13</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>4</EmployeeID>
          <OrderDate>1998-01-06T00:00:00</OrderDate>
          <RequiredDate>1998-02-03T00:00:00</RequiredDate>
          <ShipInfo ShippedDate="1998-02-04T00:00:00">
            <ShipVia>2</ShipVia>
            <Freight>719.78</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>3</EmployeeID>
          <OrderDate>1998-03-09T00:00:00</OrderDate>
          <RequiredDate>1998-04-06T00:00:00</RequiredDate>
          <ShipInfo ShippedDate="1998-03-18T00:00:00">
            <ShipVia>2</ShipVia>
            <Freight>33.68</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>3</EmployeeID>
          <OrderDate>1998-04-07T00:00:00</OrderDate>
          <RequiredDate>1998-05-05T00:00:00</RequiredDate>
          <ShipInfo ShippedDate="1998-04-15T00:00:00">
            <ShipVia>2</ShipVia>
            <Freight>25.19</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>4</EmployeeID>
          <OrderDate>1998-04-22T00:00:00</OrderDate>
          <RequiredDate>1998-05-20T00:00:00</RequiredDate>
          <ShipInfo>
            <ShipVia>3</ShipVia>
            <Freight>18.84</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>HUNGC</CustomerID>
          <EmployeeID>Three</EmployeeID>
          <OrderDate>1996-12-06T00:00:00</OrderDate>
          <RequiredDate>1997-01-03T00:00:00</RequiredDate>
          <ShipInfo ShippedDate="1996-12-09T00:00:00">
            <ShipVia>2</ShipVia>
            <Freight>20.12</Freight>
            <ShipName>Hungry Coyote Import Store</ShipName>
            <ShipAddress>City Center Plaza 516 Main St.</ShipAddress>
            <ShipCity>Elgin</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97827</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
        <Order>
          <CustomerID>GREAL</CustomerID>
          <EmployeeID>4</EmployeeID>
          <OrderDate>1998-04-30T00:00:00</OrderDate>
          <RequiredDate>1998-06-11T00:00:00</RequiredDate>
          <ShipInfo>
            <ShipVia>3</ShipVia>
            <Freight>14.01</Freight>
            <ShipName>Great Lakes Food Market</ShipName>
            <ShipAddress>2732 Baker Blvd.</ShipAddress>
            <ShipCity>Eugene</ShipCity>
            <ShipRegion>OR</ShipRegion>
            <ShipPostalCode>97403</ShipPostalCode>
            <ShipCountry>USA</ShipCountry>
          </ShipInfo>
        </Order>
      </Orders>
      <Extras>
        <Notes><![CDATA[Orders <after> 1998 are not shipped yet]]></Notes>
        <DifficultField>Hello!</DifficultField>
      </Extras>
    </Root>
  </soap:Body>
</soap:Envelope>"#;

pub const SF_VALUE_1: &str = "Value One";
pub const SF_ATTR_1: &str = "Attribute One";
pub const SF_VALUE_2: &str = "Value Two";
pub const SF_ATTR_2: &str = "Attribute Two";
pub const SF_VALUE_3: &str = "Value Three";
pub const SF_ATTR_3: &str = "Attribute Three";

/// Sibling elements carrying both a text value and an attribute.
pub fn single_fields_with_attributes() -> String {
    format!(
        r#"<Response>
  <Fields>
    <SingleField attribute="{SF_ATTR_1}">{SF_VALUE_1}</SingleField>
    <SingleField attribute="{SF_ATTR_2}">{SF_VALUE_2}</SingleField>
    <SingleField attribute="{SF_ATTR_3}">{SF_VALUE_3}</SingleField>
  </Fields>
</Response>"#
    )
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl XmlObject for Address {
    fn define(def: &mut DefinitionBuilder<Self>) {
        def.field("Address", |a: &mut Address, v: String| a.address = v)
            .field("City", |a: &mut Address, v: String| a.city = v)
            .field("Region", |a: &mut Address, v: String| a.region = v)
            .field("PostalCode", |a: &mut Address, v: String| a.postal_code = v)
            .field("Country", |a: &mut Address, v: String| a.country = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: String,
    pub company_name: String,
    pub contact_name: String,
    pub contact_title: String,
    pub phone: String,
    pub fax: Option<String>,
    pub full_address: Address,
}

impl XmlObject for Customer {
    fn define(def: &mut DefinitionBuilder<Self>) {
        def.node("//Customer")
            .field("@CustomerID", |c: &mut Customer, v: String| c.customer_id = v)
            .field("CompanyName", |c: &mut Customer, v: String| c.company_name = v)
            .field("ContactName", |c: &mut Customer, v: String| c.contact_name = v)
            .field("ContactTitle", |c: &mut Customer, v: String| c.contact_title = v)
            .field("Phone", |c: &mut Customer, v: String| c.phone = v)
            .field("Fax", |c: &mut Customer, v: Option<String>| c.fax = v)
            .object("FullAddress", |c: &mut Customer, v: Address| c.full_address = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ShipInfo {
    pub shipped_date: Option<NaiveDateTime>,
    pub ship_via: i32,
    pub freight: f64,
    pub ship_name: String,
    pub ship_address: String,
    pub ship_city: String,
    pub ship_region: String,
    pub ship_postal_code: String,
    pub ship_country: String,
}

impl XmlObject for ShipInfo {
    fn define(def: &mut DefinitionBuilder<Self>) {
        def.field("@ShippedDate", |s: &mut ShipInfo, v: Option<NaiveDateTime>| {
            s.shipped_date = v
        })
        .field("ShipVia", |s: &mut ShipInfo, v: i32| s.ship_via = v)
        .field("Freight", |s: &mut ShipInfo, v: f64| s.freight = v)
        .field("ShipName", |s: &mut ShipInfo, v: String| s.ship_name = v)
        .field("ShipAddress", |s: &mut ShipInfo, v: String| s.ship_address = v)
        .field("ShipCity", |s: &mut ShipInfo, v: String| s.ship_city = v)
        .field("ShipRegion", |s: &mut ShipInfo, v: String| s.ship_region = v)
        .field("ShipPostalCode", |s: &mut ShipInfo, v: String| s.ship_postal_code = v)
        .field("ShipCountry", |s: &mut ShipInfo, v: String| s.ship_country = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Order {
    pub customer_id: String,
    pub employee_id: i32,
    pub order_date: Option<NaiveDateTime>,
    pub required_date: Option<NaiveDateTime>,
    pub ship_info: ShipInfo,
}

impl XmlObject for Order {
    fn define(def: &mut DefinitionBuilder<Self>) {
        def.node("//Order")
            .field("CustomerID", |o: &mut Order, v: String| o.customer_id = v)
            .field("EmployeeID", |o: &mut Order, v: i32| o.employee_id = v)
            .field("OrderDate", |o: &mut Order, v: Option<NaiveDateTime>| o.order_date = v)
            .field("RequiredDate", |o: &mut Order, v: Option<NaiveDateTime>| {
                o.required_date = v
            })
            .object("ShipInfo", |o: &mut Order, v: ShipInfo| o.ship_info = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CustsAndOrders {
    pub customers: Vec<Option<Customer>>,
    pub orders: Vec<Option<Order>>,
    pub difficult_field: String,
    pub notes: String,
}

impl XmlObject for CustsAndOrders {
    fn define(def: &mut DefinitionBuilder<Self>) {
        def.node("//Root")
            .list("Customers/Customer", |r: &mut CustsAndOrders, c: Option<Customer>| {
                r.customers.push(c)
            })
            .list("//Order", |r: &mut CustsAndOrders, o: Option<Order>| r.orders.push(o))
            .field("Extras/DifficultField", |r: &mut CustsAndOrders, v: String| {
                r.difficult_field = v
            })
            .field("Extras/Notes", |r: &mut CustsAndOrders, v: String| r.notes = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SingleField {
    pub value: String,
    pub attribute: String,
}

impl XmlObject for SingleField {
    fn define(def: &mut DefinitionBuilder<Self>) {
        def.node("//SingleField")
            .field("", |f: &mut SingleField, v: String| f.value = v)
            .field("@attribute", |f: &mut SingleField, v: String| f.attribute = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NonAnnotatedObject {
    pub id: i32,
    pub name: String,
}

impl XmlObject for NonAnnotatedObject {
    fn define(_def: &mut DefinitionBuilder<Self>) {}
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NonAnnotatedObjectList {
    pub objects: Vec<Option<NonAnnotatedObject>>,
}

impl XmlObject for NonAnnotatedObjectList {
    fn define(def: &mut DefinitionBuilder<Self>) {
        def.node("//Objects").list(
            "Object",
            |l: &mut NonAnnotatedObjectList, o: Option<NonAnnotatedObject>| l.objects.push(o),
        );
    }
}
